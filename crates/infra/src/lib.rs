//! Infrastructure layer: configuration, document store, repositories and the
//! services that put the domain rules in front of storage.

pub mod config;
pub mod context;
pub mod document_store;
pub mod error;
pub mod repository;
pub mod services;


pub use config::StorefrontConfig;
pub use context::StorefrontContext;
pub use document_store::{DocumentStore, InMemoryDocumentStore, Query};
pub use error::{InfraError, InfraResult};
pub use repository::Repository;
