use storefront_catalog::{Item, ItemKind};
use storefront_core::DocumentId;

use crate::document_store::{DocumentStore, Query};
use crate::error::InfraResult;
use crate::repository::Repository;

/// Product and service listings.
#[derive(Debug, Clone)]
pub struct CatalogService<S> {
    items: Repository<Item, S>,
}

impl<S: DocumentStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self {
            items: Repository::new(store),
        }
    }

    pub fn create_item(&self, item: Item) -> InfraResult<Item> {
        item.validate()?;
        let created = self.items.create(&item)?;
        tracing::info!(item_id = ?created.id, kind = ?created.kind, "item created");
        Ok(created)
    }

    pub fn get_item(&self, id: &DocumentId) -> InfraResult<Item> {
        self.items.get(id)
    }

    pub fn list_items(&self, kind: Option<ItemKind>) -> InfraResult<Vec<Item>> {
        let query = match kind {
            Some(ItemKind::Product) => Query::new().filter_eq("kind", "product"),
            Some(ItemKind::Service) => Query::new().filter_eq("kind", "service"),
            None => Query::new(),
        };
        self.items.query(&query)
    }

    pub fn update_item(&self, item: &Item) -> InfraResult<()> {
        item.validate()?;
        self.items.save(item)
    }

    pub fn delete_item(&self, id: &DocumentId) -> InfraResult<()> {
        self.items.delete(id)
    }
}
