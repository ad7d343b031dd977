use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{DocumentId, DomainError, DomainResult, Record};

/// Whether an item is a physical product or a bookable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Product,
    Service,
}

/// A sellable item with its base price.
///
/// `id` is `None` until the item has been stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(skip)]
    pub id: Option<DocumentId>,
    pub kind: ItemKind,
    pub name: String,
    pub price: Decimal,
}

impl Item {
    pub fn new(kind: ItemKind, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: None,
            kind,
            name: name.into(),
            price,
        }
    }

    pub fn with_id(mut self, id: impl Into<DocumentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn base_price(&self) -> Decimal {
        self.price
    }

    /// Validate the fields a create/update must carry.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if self.price.is_sign_negative() {
            return Err(DomainError::validation("item price cannot be negative"));
        }
        Ok(())
    }
}

impl Record for Item {
    const COLLECTION: &'static str = "items";

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_blank_name() {
        let item = Item::new(ItemKind::Product, "  ", Decimal::from(10));
        match item.validate() {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("name")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_negative_price() {
        let item = Item::new(ItemKind::Service, "Haircut", Decimal::from(-1));
        assert!(matches!(item.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn id_is_not_part_of_the_document_body() {
        let item = Item::new(ItemKind::Service, "Massage", Decimal::new(4550, 2)).with_id("svc-1");
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["kind"], "service");
        assert_eq!(json["price"], "45.50");
        assert_eq!(item.base_price(), Decimal::new(4550, 2));
    }
}
