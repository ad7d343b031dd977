//! Storefront context: configuration plus the handles built from it.

use storefront_observability::Analytics;
use storefront_promotions::TransactionFee;

use crate::config::StorefrontConfig;
use crate::document_store::DocumentStore;
use crate::error::InfraResult;
use crate::services::{
    BookingService, CatalogService, NotificationService, OrderService, PromotionService,
};

/// Everything a request handler needs, built once at startup.
///
/// Replaces process-wide flags (analytics toggle, cached business id): each
/// context carries its own, and services receive them explicitly.
#[derive(Debug, Clone)]
pub struct StorefrontContext<S> {
    config: StorefrontConfig,
    analytics: Analytics,
    store: S,
}

impl<S> StorefrontContext<S>
where
    S: DocumentStore + Clone,
{
    pub fn new(config: StorefrontConfig, store: S) -> Self {
        let analytics = Analytics::new(config.analytics_enabled, config.business_id.clone());
        Self {
            config,
            analytics,
            store,
        }
    }

    /// Build from the process environment.
    pub fn from_env(store: S) -> InfraResult<Self> {
        Ok(Self::new(StorefrontConfig::from_env()?, store))
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn business_id(&self) -> &str {
        &self.config.business_id
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    pub fn transaction_fee(&self) -> TransactionFee {
        self.config.transaction_fee
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn orders(&self) -> OrderService<S> {
        OrderService::new(self.store.clone(), self.analytics.clone())
    }

    pub fn bookings(&self) -> BookingService<S> {
        BookingService::new(self.store.clone(), self.analytics.clone())
    }

    pub fn catalog(&self) -> CatalogService<S> {
        CatalogService::new(self.store.clone())
    }

    pub fn promotions(&self) -> PromotionService<S> {
        PromotionService::new(self.store.clone(), self.config.transaction_fee)
    }

    pub fn notifications(&self) -> NotificationService<S> {
        NotificationService::new(self.store.clone())
    }
}
