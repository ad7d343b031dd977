//! Bookings domain module.
//!
//! Business rules for service bookings (appointments), implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod booking;

pub use booking::{BOOKING_TRANSITIONS, Booking, BookingStatus, NewBooking};
