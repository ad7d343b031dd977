//! Storefront services: CRUD over the document store, with the lifecycle and
//! pricing rules applied on the way in.

pub mod bookings;
pub mod catalog;
pub mod notifications;
pub mod orders;
pub mod promotions;

pub use bookings::BookingService;
pub use catalog::CatalogService;
pub use notifications::{Notification, NotificationKind, NotificationService};
pub use orders::OrderService;
pub use promotions::PromotionService;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::document_store::Document;
use crate::error::InfraResult;
use crate::repository::to_document;

/// Partial update written on every lifecycle change.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusPatch<S> {
    status: S,
    updated_at: DateTime<Utc>,
}

fn status_patch<S: Serialize>(status: S, updated_at: DateTime<Utc>) -> InfraResult<Document> {
    to_document(&StatusPatch { status, updated_at })
}
