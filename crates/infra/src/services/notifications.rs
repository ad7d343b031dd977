use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DocumentId, Record};

use crate::document_store::{DocumentStore, Query, SortDirection};
use crate::error::InfraResult;
use crate::repository::{Repository, to_document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    OrderStatus,
    BookingStatus,
}

/// An admin-facing notification, stored in the `notifications` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(skip)]
    pub id: Option<DocumentId>,
    pub kind: NotificationKind,
    pub subject_id: DocumentId,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Record for Notification {
    const COLLECTION: &'static str = "notifications";

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = Some(id);
    }
}

#[derive(Debug, Serialize)]
struct ReadPatch {
    read: bool,
}

#[derive(Debug, Clone)]
pub struct NotificationService<S> {
    notifications: Repository<Notification, S>,
}

impl<S: DocumentStore> NotificationService<S> {
    pub fn new(store: S) -> Self {
        Self {
            notifications: Repository::new(store),
        }
    }

    /// Record that `subject_id` moved from `from` to `to`.
    pub fn notify_status_change(
        &self,
        kind: NotificationKind,
        subject_id: &DocumentId,
        from: &str,
        to: &str,
        at: DateTime<Utc>,
    ) -> InfraResult<Notification> {
        let noun = match kind {
            NotificationKind::OrderStatus => "Order",
            NotificationKind::BookingStatus => "Booking",
        };
        let notification = Notification {
            id: None,
            kind,
            subject_id: subject_id.clone(),
            message: format!("{noun} {subject_id} changed from {from} to {to}"),
            read: false,
            created_at: at,
        };
        self.notifications.create(&notification)
    }

    /// Newest unread notifications first.
    pub fn list_unread(&self, limit: usize) -> InfraResult<Vec<Notification>> {
        let query = Query::new()
            .filter_eq("read", false)
            .order_by("createdAt", SortDirection::Descending)
            .limit(limit);
        self.notifications.query(&query)
    }

    pub fn mark_read(&self, id: &DocumentId) -> InfraResult<()> {
        self.notifications
            .update(id, to_document(&ReadPatch { read: true })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::document_store::InMemoryDocumentStore;

    #[test]
    fn unread_list_shrinks_after_mark_read() {
        let service = NotificationService::new(Arc::new(InMemoryDocumentStore::new()));
        let order_id = DocumentId::from("o-1");
        let first = service
            .notify_status_change(NotificationKind::OrderStatus, &order_id, "PENDING", "PAID", Utc::now())
            .unwrap();
        service
            .notify_status_change(NotificationKind::OrderStatus, &order_id, "PAID", "SHIPPED", Utc::now())
            .unwrap();
        assert_eq!(first.message, "Order o-1 changed from PENDING to PAID");
        assert_eq!(service.list_unread(10).unwrap().len(), 2);

        service.mark_read(first.id.as_ref().unwrap()).unwrap();
        let unread = service.list_unread(10).unwrap();
        assert_eq!(unread.len(), 1);
        assert!(unread[0].message.ends_with("to SHIPPED"));
    }

    #[test]
    fn mark_read_missing_is_not_found() {
        let service = NotificationService::new(Arc::new(InMemoryDocumentStore::new()));
        assert!(service.mark_read(&DocumentId::from("nope")).unwrap_err().is_not_found());
    }
}
