use chrono::{DateTime, Utc};
use serde_json::json;

use storefront_catalog::Item;
use storefront_core::DocumentId;
use storefront_promotions::{ItemPrice, Promotion, PromotionStatus, TransactionFee, price_item_at};

use crate::document_store::{DocumentStore, Query};
use crate::error::InfraResult;
use crate::repository::{Repository, to_document};

#[derive(Debug, Clone)]
pub struct PromotionService<S> {
    promotions: Repository<Promotion, S>,
    fee: TransactionFee,
}

impl<S: DocumentStore> PromotionService<S> {
    pub fn new(store: S, fee: TransactionFee) -> Self {
        Self {
            promotions: Repository::new(store),
            fee,
        }
    }

    pub fn create_promotion(&self, promotion: Promotion) -> InfraResult<Promotion> {
        promotion.validate()?;
        let created = self.promotions.create(&promotion)?;
        tracing::info!(promotion_id = ?created.id, name = %created.name, "promotion created");
        Ok(created)
    }

    pub fn get_promotion(&self, id: &DocumentId) -> InfraResult<Promotion> {
        self.promotions.get(id)
    }

    /// ACTIVE promotions in insertion order. Whether each is inside its
    /// validity window is decided by the pricing resolver. Documents that do
    /// not decode are skipped with a warning.
    pub fn list_active_promotions(&self) -> InfraResult<Vec<Promotion>> {
        self.promotions
            .query_decodable(&Query::new().filter_eq("status", "ACTIVE"))
    }

    pub fn deactivate_promotion(&self, id: &DocumentId) -> InfraResult<()> {
        let patch = to_document(&json!({ "status": PromotionStatus::Inactive }))?;
        self.promotions.update(id, patch)?;
        tracing::info!(promotion_id = %id, "promotion deactivated");
        Ok(())
    }

    pub fn price_item(&self, item: &Item) -> InfraResult<ItemPrice> {
        self.price_item_at(item, Utc::now())
    }

    /// Price `item` against the promotions effective at `now`.
    pub fn price_item_at(&self, item: &Item, now: DateTime<Utc>) -> InfraResult<ItemPrice> {
        let promotions = self.list_active_promotions()?;
        let priced = price_item_at(item, &promotions, &self.fee, now);
        tracing::debug!(
            item_id = ?item.id,
            promotion_id = ?priced.promotion_id,
            final_price = %priced.final_price,
            "priced item"
        );
        Ok(priced)
    }
}
