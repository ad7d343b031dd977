use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{
    DocumentId, DomainError, DomainResult, LifecycleStatus, Record, TransitionRules,
};

/// Booking status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Paid,
    Completed,
    Canceled,
    NoShow,
    Refunded,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Paid => "PAID",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Canceled => "CANCELED",
            BookingStatus::NoShow => "NO_SHOW",
            BookingStatus::Refunded => "REFUNDED",
        }
    }
}

impl core::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal states: COMPLETED, CANCELED, NO_SHOW, REFUNDED.
/// Explicit terminal entries: PAID -> REFUNDED, CONFIRMED -> COMPLETED.
pub static BOOKING_TRANSITIONS: TransitionRules<BookingStatus> = TransitionRules::new(
    &[
        BookingStatus::Completed,
        BookingStatus::Canceled,
        BookingStatus::NoShow,
        BookingStatus::Refunded,
    ],
    BookingStatus::Completed,
    &[
        (BookingStatus::Paid, BookingStatus::Refunded),
        (BookingStatus::Confirmed, BookingStatus::Completed),
    ],
);

impl LifecycleStatus for BookingStatus {
    const ALL: &'static [Self] = &[
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Paid,
        BookingStatus::Completed,
        BookingStatus::Canceled,
        BookingStatus::NoShow,
        BookingStatus::Refunded,
    ];

    fn rules() -> &'static TransitionRules<Self> {
        &BOOKING_TRANSITIONS
    }
}

/// Input for creating a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub service_id: DocumentId,
    pub customer_name: String,
    pub customer_email: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub price: Decimal,
    pub notes: Option<String>,
}

impl NewBooking {
    pub fn validate(&self) -> DomainResult<()> {
        if self.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name is required"));
        }
        if !self.customer_email.contains('@') {
            return Err(DomainError::validation("customer email is invalid"));
        }
        if self.ends_at <= self.starts_at {
            return Err(DomainError::validation("booking must end after it starts"));
        }
        if self.price.is_sign_negative() {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(())
    }
}

/// A service booking as stored in the `bookings` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(skip)]
    pub id: Option<DocumentId>,
    pub service_id: DocumentId,
    pub customer_name: String,
    pub customer_email: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Validate input and build a PENDING booking.
    pub fn request(new: NewBooking, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id: None,
            service_id: new.service_id,
            customer_name: new.customer_name,
            customer_email: new.customer_email,
            starts_at: new.starts_at,
            ends_at: new.ends_at,
            price: new.price,
            notes: new.notes,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply a status change if the lifecycle rules admit it.
    pub fn change_status(
        &mut self,
        proposed: BookingStatus,
        at: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.status = self.status.transition_to(proposed)?;
        self.updated_at = at;
        Ok(())
    }

    pub fn cancel(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        if self.is_terminal() {
            return Err(DomainError::invalid_transition(self.status, BookingStatus::Canceled));
        }
        self.status = BookingStatus::Canceled;
        self.updated_at = at;
        Ok(())
    }

    /// A customer can only miss a booking that was confirmed or paid for.
    pub fn mark_no_show(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        if !matches!(self.status, BookingStatus::Confirmed | BookingStatus::Paid) {
            return Err(DomainError::invalid_transition(self.status, BookingStatus::NoShow));
        }
        self.status = BookingStatus::NoShow;
        self.updated_at = at;
        Ok(())
    }
}

impl Record for Booking {
    const COLLECTION: &'static str = "bookings";

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
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
    }

    fn test_new_booking() -> NewBooking {
        NewBooking {
            service_id: DocumentId::from("svc-1"),
            customer_name: "Grace".to_string(),
            customer_email: "grace@example.com".to_string(),
            starts_at: test_time() + Duration::days(1),
            ends_at: test_time() + Duration::days(1) + Duration::hours(1),
            price: Decimal::from(60),
            notes: None,
        }
    }

    fn booking_in(status: BookingStatus) -> Booking {
        let mut booking = Booking::request(test_new_booking(), test_time()).unwrap();
        booking.status = status;
        booking
    }

    #[test]
    fn explicit_terminal_entries() {
        assert!(BookingStatus::Paid.can_transition_to(BookingStatus::Refunded));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Refunded));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::NoShow));
    }

    #[test]
    fn no_show_is_absorbing() {
        for &next in BookingStatus::ALL {
            assert_eq!(
                BookingStatus::NoShow.can_transition_to(next),
                next == BookingStatus::NoShow
            );
        }
    }

    #[test]
    fn request_rejects_inverted_slot() {
        let mut new = test_new_booking();
        new.ends_at = new.starts_at;
        match Booking::request(new, test_time()).unwrap_err() {
            DomainError::Validation(msg) if msg.contains("end after it starts") => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn mark_no_show_requires_confirmed_or_paid() {
        let mut pending = booking_in(BookingStatus::Pending);
        assert!(pending.mark_no_show(test_time()).is_err());
        assert_eq!(pending.status, BookingStatus::Pending);

        let mut confirmed = booking_in(BookingStatus::Confirmed);
        confirmed.mark_no_show(test_time()).unwrap();
        assert_eq!(confirmed.status, BookingStatus::NoShow);
    }

    #[test]
    fn cancel_from_terminal_is_rejected() {
        let mut done = booking_in(BookingStatus::Completed);
        let err = done.cancel(test_time()).unwrap_err();
        assert_eq!(err, DomainError::invalid_transition("COMPLETED", "CANCELED"));
    }

    #[test]
    fn change_status_bumps_updated_at() {
        let mut booking = booking_in(BookingStatus::Pending);
        let later = test_time() + Duration::minutes(10);
        booking.change_status(BookingStatus::Confirmed, later).unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.updated_at, later);
    }

    #[test]
    fn no_show_round_trips_through_json() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::NoShow).unwrap(),
            "\"NO_SHOW\""
        );
    }

    fn any_status() -> impl Strategy<Value = BookingStatus> {
        proptest::sample::select(BookingStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn identity_is_always_valid(s in any_status()) {
            prop_assert!(s.can_transition_to(s));
        }

        #[test]
        fn terminal_states_are_absorbing(t in any_status(), x in any_status()) {
            if t.is_terminal() && t != x {
                prop_assert!(!t.can_transition_to(x));
            }
        }

        #[test]
        fn non_terminal_can_complete(s in any_status()) {
            if !s.is_terminal() {
                prop_assert!(s.can_transition_to(BookingStatus::Completed));
            }
        }
    }
}
