//! Orders domain module.
//!
//! Business rules for storefront orders, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod order;

pub use order::{ORDER_TRANSITIONS, NewOrder, Order, OrderLine, OrderStatus};
