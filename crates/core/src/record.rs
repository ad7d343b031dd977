//! Record trait: a typed document living in a named collection.

use serde::{Serialize, de::DeserializeOwned};

use crate::id::DocumentId;

/// A record persisted as one document in the document store.
///
/// The id lives outside the document body (it is the store key), so records
/// expose it through `id`/`set_id` and skip it when serializing.
pub trait Record: Serialize + DeserializeOwned + Clone + core::fmt::Debug {
    /// Collection name in the document store (e.g. `"orders"`).
    const COLLECTION: &'static str;

    /// Returns the record identifier, if the record has been stored.
    fn id(&self) -> Option<&DocumentId>;

    /// Assign the identifier (after create, or when loading by key).
    fn set_id(&mut self, id: DocumentId);
}
