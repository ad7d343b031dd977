use chrono::Utc;
use serde_json::json;

use storefront_bookings::{Booking, BookingStatus, NewBooking};
use storefront_core::DocumentId;
use storefront_observability::Analytics;

use super::notifications::{NotificationKind, NotificationService};
use super::status_patch;
use crate::document_store::{DocumentStore, Query, SortDirection};
use crate::error::InfraResult;
use crate::repository::Repository;

#[derive(Debug, Clone)]
pub struct BookingService<S> {
    bookings: Repository<Booking, S>,
    notifications: NotificationService<S>,
    analytics: Analytics,
}

impl<S> BookingService<S>
where
    S: DocumentStore + Clone,
{
    pub fn new(store: S, analytics: Analytics) -> Self {
        Self {
            bookings: Repository::new(store.clone()),
            notifications: NotificationService::new(store),
            analytics,
        }
    }

    pub fn create_booking(&self, new: NewBooking) -> InfraResult<Booking> {
        let booking = Booking::request(new, Utc::now())?;
        let created = self.bookings.create(&booking)?;

        tracing::info!(
            booking_id = ?created.id,
            service_id = %created.service_id,
            starts_at = %created.starts_at,
            "booking created"
        );
        self.analytics.track(
            "booking_created",
            &json!({ "bookingId": created.id, "serviceId": created.service_id }),
        );
        Ok(created)
    }

    pub fn get_booking(&self, id: &DocumentId) -> InfraResult<Booking> {
        self.bookings.get(id)
    }

    /// Soonest first, optionally restricted to one status.
    pub fn list_bookings(
        &self,
        status: Option<BookingStatus>,
        limit: Option<usize>,
    ) -> InfraResult<Vec<Booking>> {
        let mut query = Query::new().order_by("startsAt", SortDirection::Ascending);
        if let Some(status) = status {
            query = query.filter_eq("status", status.as_str());
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        self.bookings.query(&query)
    }

    /// Move a booking to `proposed` if the lifecycle rules admit it.
    pub fn update_status(
        &self,
        id: &DocumentId,
        proposed: BookingStatus,
    ) -> InfraResult<Booking> {
        let mut booking = self.bookings.get(id)?;
        let from = booking.status;

        if let Err(err) = booking.change_status(proposed, Utc::now()) {
            tracing::warn!(booking_id = %id, from = %from, to = %proposed, "rejected booking status change");
            return Err(err.into());
        }
        if from != proposed {
            self.persist_status(id, from, &booking)?;
        }
        Ok(booking)
    }

    pub fn cancel_booking(&self, id: &DocumentId) -> InfraResult<Booking> {
        let mut booking = self.bookings.get(id)?;
        let from = booking.status;

        if let Err(err) = booking.cancel(Utc::now()) {
            tracing::warn!(booking_id = %id, from = %from, "rejected booking cancellation");
            return Err(err.into());
        }
        self.persist_status(id, from, &booking)?;
        Ok(booking)
    }

    pub fn mark_no_show(&self, id: &DocumentId) -> InfraResult<Booking> {
        let mut booking = self.bookings.get(id)?;
        let from = booking.status;

        if let Err(err) = booking.mark_no_show(Utc::now()) {
            tracing::warn!(booking_id = %id, from = %from, "rejected no-show");
            return Err(err.into());
        }
        self.persist_status(id, from, &booking)?;
        Ok(booking)
    }

    pub fn delete_booking(&self, id: &DocumentId) -> InfraResult<()> {
        self.bookings.delete(id)?;
        tracing::info!(booking_id = %id, "booking deleted");
        Ok(())
    }

    fn persist_status(
        &self,
        id: &DocumentId,
        from: BookingStatus,
        booking: &Booking,
    ) -> InfraResult<()> {
        self.bookings
            .update(id, status_patch(booking.status, booking.updated_at)?)?;
        self.notifications.notify_status_change(
            NotificationKind::BookingStatus,
            id,
            from.as_str(),
            booking.status.as_str(),
            booking.updated_at,
        )?;

        tracing::info!(booking_id = %id, from = %from, to = %booking.status, "booking status changed");
        self.analytics.track(
            "booking_status_changed",
            &json!({ "bookingId": id, "from": from, "to": booking.status }),
        );
        Ok(())
    }
}
