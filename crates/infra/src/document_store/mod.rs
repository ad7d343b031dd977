//! Document store boundary.
//!
//! The storefront persists records as JSON documents grouped in named
//! collections. This module defines the store contract consumed by the
//! repositories, plus an in-memory implementation for tests/dev.

pub mod in_memory;
pub mod query;
pub mod r#trait;

pub use in_memory::InMemoryDocumentStore;
pub use query::{Filter, Query, SortDirection};
pub use r#trait::{Document, DocumentStore, StoredDocument};
