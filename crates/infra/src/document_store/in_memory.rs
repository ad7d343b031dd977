use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use uuid::Uuid;

use storefront_core::DomainError;

use super::query::Query;
use super::r#trait::{Document, DocumentStore, StoredDocument};
use crate::error::{InfraError, InfraResult};

#[derive(Debug)]
struct Entry {
    /// Insertion sequence; unordered queries return documents in this order.
    seq: u64,
    data: Document,
}

#[derive(Debug, Default)]
struct Collections {
    next_seq: u64,
    by_name: HashMap<String, HashMap<String, Entry>>,
}

/// In-memory document store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<Collections>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a document under a caller-chosen key, replacing any existing one.
    pub fn put(&self, collection: &str, id: &str, data: Document) -> InfraResult<()> {
        let mut collections = self.write()?;
        let seq = collections.next_seq;
        let docs = collections.by_name.entry(collection.to_string()).or_default();
        match docs.get_mut(id) {
            // Replacing keeps the original position.
            Some(entry) => entry.data = data,
            None => {
                docs.insert(id.to_string(), Entry { seq, data });
                collections.next_seq += 1;
            }
        }
        Ok(())
    }

    pub fn len(&self, collection: &str) -> InfraResult<usize> {
        let collections = self.read()?;
        Ok(collections.by_name.get(collection).map(HashMap::len).unwrap_or(0))
    }

    fn read(&self) -> InfraResult<std::sync::RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| InfraError::Store("lock poisoned".to_string()))
    }

    fn write(&self) -> InfraResult<std::sync::RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| InfraError::Store("lock poisoned".to_string()))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, collection: &str, id: &str) -> InfraResult<Option<Document>> {
        let collections = self.read()?;
        Ok(collections
            .by_name
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|entry| entry.data.clone()))
    }

    fn query(&self, collection: &str, query: &Query) -> InfraResult<Vec<StoredDocument>> {
        let collections = self.read()?;
        let Some(docs) = collections.by_name.get(collection) else {
            return Ok(vec![]);
        };

        let mut entries: Vec<(&String, &Entry)> = docs
            .iter()
            .filter(|(_, entry)| query.matches(&entry.data))
            .collect();
        entries.sort_by_key(|(_, entry)| entry.seq);

        let mut matched: Vec<StoredDocument> = entries
            .into_iter()
            .map(|(id, entry)| StoredDocument {
                id: id.clone(),
                data: entry.data.clone(),
            })
            .collect();

        // Stable sort keeps insertion order among equal sort values.
        matched.sort_by(|a, b| query.compare(&a.data, &b.data));

        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    fn create(&self, collection: &str, data: Document) -> InfraResult<String> {
        let id = Uuid::now_v7().to_string();
        self.put(collection, &id, data)?;
        Ok(id)
    }

    fn update(&self, collection: &str, id: &str, patch: Document) -> InfraResult<()> {
        let mut collections = self.write()?;
        let entry = collections
            .by_name
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| DomainError::not_found(collection, id))?;
        merge(&mut entry.data, patch);
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> InfraResult<bool> {
        let mut collections = self.write()?;
        Ok(collections
            .by_name
            .get_mut(collection)
            .is_some_and(|docs| docs.remove(id).is_some()))
    }
}

fn merge(target: &mut Document, patch: Document) {
    for (key, value) in patch {
        if let Value::Object(nested) = value {
            if let Some(Value::Object(existing)) = target.get_mut(&key) {
                merge(existing, nested);
                continue;
            }
            target.insert(key, Value::Object(nested));
        } else {
            target.insert(key, value);
        }
    }
}
