//! Typed repositories over the document store.

use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value;

use storefront_core::{DocumentId, DomainError, Record};

use crate::document_store::{Document, DocumentStore, Query};
use crate::error::{InfraError, InfraResult};

/// CRUD access to one record type's collection.
#[derive(Debug, Clone)]
pub struct Repository<R, S> {
    store: S,
    _record: PhantomData<fn() -> R>,
}

impl<R, S> Repository<R, S>
where
    R: Record,
    S: DocumentStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Load by id, failing with not-found if absent.
    pub fn get(&self, id: &DocumentId) -> InfraResult<R> {
        self.find(id)?
            .ok_or_else(|| DomainError::not_found(R::COLLECTION, id.to_string()).into())
    }

    pub fn find(&self, id: &DocumentId) -> InfraResult<Option<R>> {
        let key = id.as_key();
        self.store
            .get(R::COLLECTION, &key)?
            .map(|doc| from_document(&key, doc))
            .transpose()
    }

    pub fn query(&self, query: &Query) -> InfraResult<Vec<R>> {
        self.store
            .query(R::COLLECTION, query)?
            .into_iter()
            .map(|stored| from_document(&stored.id, stored.data))
            .collect()
    }

    /// Like `query`, but documents that fail to decode are logged and left
    /// out instead of failing the whole read.
    pub fn query_decodable(&self, query: &Query) -> InfraResult<Vec<R>> {
        let records = self
            .store
            .query(R::COLLECTION, query)?
            .into_iter()
            .filter_map(|stored| match from_document(&stored.id, stored.data) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(
                        collection = R::COLLECTION,
                        id = %stored.id,
                        error = %err,
                        "skipping undecodable document"
                    );
                    None
                }
            })
            .collect();
        Ok(records)
    }

    /// Insert `record` and return it with its new id.
    pub fn create(&self, record: &R) -> InfraResult<R> {
        let id = self.store.create(R::COLLECTION, to_document(record)?)?;
        let mut created = record.clone();
        created.set_id(DocumentId::Text(id));
        Ok(created)
    }

    /// Merge a partial document into the stored record.
    pub fn update(&self, id: &DocumentId, patch: Document) -> InfraResult<()> {
        self.store.update(R::COLLECTION, &id.as_key(), patch)
    }

    /// Merge the full record body into its stored document.
    pub fn save(&self, record: &R) -> InfraResult<()> {
        let id = record
            .id()
            .ok_or_else(|| DomainError::validation(format!("{} record has no id", R::COLLECTION)))?;
        self.update(id, to_document(record)?)
    }

    pub fn delete(&self, id: &DocumentId) -> InfraResult<()> {
        if self.store.delete(R::COLLECTION, &id.as_key())? {
            Ok(())
        } else {
            Err(DomainError::not_found(R::COLLECTION, id.to_string()).into())
        }
    }
}

/// Serialize a value that must become a JSON object (records, patches).
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> InfraResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(InfraError::Store(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn from_document<R: Record>(id: &str, doc: Document) -> InfraResult<R> {
    let mut record: R = serde_json::from_value(Value::Object(doc))?;
    record.set_id(DocumentId::from(id));
    Ok(record)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
