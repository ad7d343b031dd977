//! Catalog domain module: sellable items (products and services).
//!
//! Pure domain logic (no IO, no HTTP, no storage).

pub mod item;

pub use item::{Item, ItemKind};
