//! Key-value persistence seam for entity collections.
//!
//! # Responsibility
//! - Define the store contract services depend on: whole-document reads,
//!   per-id upsert/delete writes.
//! - Provide an in-memory implementation for tests and embedders.
//!
//! # Invariants
//! - Reads are tolerant: a broken backing document degrades to an empty
//!   one instead of failing the caller.
//! - Writes are strict: failures propagate, and a failed write never
//!   replaces the prior document.
//! - Document iteration order is insertion order; deletes must not
//!   reshuffle the remaining entries.

use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod json_store;

/// Plain-data serialized form of one entity, as stored and returned.
pub type Record = Value;

/// Full id-to-record mapping backing one collection. Uses serde_json's
/// `preserve_order` map so iteration follows insertion order.
pub type Document = serde_json::Map<String, Value>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure on the write path.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "store i/o failure: {err}"),
            Self::Serialize(err) => write!(f, "store serialization failure: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Store contract for one entity collection.
///
/// Every operation works on the full current document; there is no
/// transaction scope across calls, so callers must not assume atomicity
/// over more than one `upsert`/`delete`.
pub trait EntityStore {
    /// Snapshot of the full current mapping.
    fn all(&self) -> Document;
    /// One record by id, or `None` when absent.
    fn get(&self, id: &str) -> Option<Record>;
    /// Inserts or replaces the record for `id`.
    fn upsert(&mut self, id: &str, record: Record) -> StoreResult<()>;
    /// Removes the record for `id`; returns whether it existed. Absent
    /// ids cause no write at all.
    fn delete(&mut self, id: &str) -> StoreResult<bool>;
}

/// In-memory store used by tests and short-lived embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Document,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityStore for MemoryStore {
    fn all(&self) -> Document {
        self.document.clone()
    }

    fn get(&self, id: &str) -> Option<Record> {
        self.document.get(id).cloned()
    }

    fn upsert(&mut self, id: &str, record: Record) -> StoreResult<()> {
        self.document.insert(id.to_string(), record);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> StoreResult<bool> {
        // shift_remove keeps the insertion order of the surviving entries.
        Ok(self.document.shift_remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityStore, MemoryStore};
    use serde_json::json;

    #[test]
    fn upsert_get_delete_round_trip() {
        let mut store = MemoryStore::new();
        store.upsert("a", json!({ "id": "a" })).unwrap();
        assert_eq!(store.get("a"), Some(json!({ "id": "a" })));
        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn delete_preserves_order_of_remaining_entries() {
        let mut store = MemoryStore::new();
        for id in ["first", "second", "third"] {
            store.upsert(id, json!({ "id": id })).unwrap();
        }
        store.delete("second").unwrap();
        let ids: Vec<String> = store.all().keys().cloned().collect();
        assert_eq!(ids, ["first", "third"]);
    }
}
