use std::sync::Arc;

use serde_json::{Map, Value};

use crate::document_store::query::Query;
use crate::error::InfraResult;

/// A document body: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// A document together with its store key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
}

/// Collection-oriented document store.
///
/// Each call succeeds or fails as a whole; there are no transactions and no
/// conflict detection between concurrent writers.
pub trait DocumentStore: Send + Sync {
    /// Read one document by key. `Ok(None)` if absent.
    fn get(&self, collection: &str, id: &str) -> InfraResult<Option<Document>>;

    /// Read documents matching `query` (filters, then order, then limit).
    fn query(&self, collection: &str, query: &Query) -> InfraResult<Vec<StoredDocument>>;

    /// Insert a new document under a store-assigned key and return the key.
    fn create(&self, collection: &str, data: Document) -> InfraResult<String>;

    /// Merge `patch` into an existing document (nested objects merge
    /// recursively). Fails with not-found if the document is absent.
    fn update(&self, collection: &str, id: &str, patch: Document) -> InfraResult<()>;

    /// Delete a document. Returns whether it existed.
    fn delete(&self, collection: &str, id: &str) -> InfraResult<bool>;
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn get(&self, collection: &str, id: &str) -> InfraResult<Option<Document>> {
        (**self).get(collection, id)
    }

    fn query(&self, collection: &str, query: &Query) -> InfraResult<Vec<StoredDocument>> {
        (**self).query(collection, query)
    }

    fn create(&self, collection: &str, data: Document) -> InfraResult<String> {
        (**self).create(collection, data)
    }

    fn update(&self, collection: &str, id: &str, patch: Document) -> InfraResult<()> {
        (**self).update(collection, id, patch)
    }

    fn delete(&self, collection: &str, id: &str) -> InfraResult<bool> {
        (**self).delete(collection, id)
    }
}
