//! Durable JSON-document store.
//!
//! # Responsibility
//! - Persist one id-to-record document as a single JSON object file.
//! - Keep every write atomic from a reader's perspective.
//!
//! # Invariants
//! - A reader observes either the whole prior document or the whole new
//!   one, never a partial file: writes go to a temp file in the same
//!   directory, fsync, then rename over the target.
//! - Read failures degrade to an empty document with a `warn` log event;
//!   write failures propagate.
//! - No cross-process locking: concurrent writers are last-writer-wins
//!   at whole-document granularity.

use crate::store::{Document, EntityStore, Record, StoreResult};
use log::{debug, warn};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// File-backed store holding one JSON object of id -> record.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Binds a store to `path`, creating the parent directory and seeding
    /// an empty document when the file does not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self { path: path.into() };
        std::fs::create_dir_all(store.dir())?;
        if !store.path.exists() {
            store.save(&Document::new())?;
        }
        Ok(store)
    }

    /// Path of the backing document file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Tolerant whole-document read: missing file, unreadable bytes or a
    /// non-object top level all degrade to an empty document.
    fn load(&self) -> Document {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                if self.path.exists() {
                    warn!(
                        "event=store_load module=store status=tolerated path={} error={err}",
                        self.path.display()
                    );
                }
                return Document::new();
            }
        };
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(document)) => document,
            Ok(_) => {
                warn!(
                    "event=store_load module=store status=tolerated path={} error=top_level_not_object",
                    self.path.display()
                );
                Document::new()
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=tolerated path={} error={err}",
                    self.path.display()
                );
                Document::new()
            }
        }
    }

    /// Atomic whole-document write: temp file in the target directory,
    /// flush + fsync, then rename over the target path.
    fn save(&self, document: &Document) -> StoreResult<()> {
        let mut temp = Builder::new().prefix(".tmp").tempfile_in(self.dir())?;
        serde_json::to_writer_pretty(&mut temp, document)?;
        temp.flush()?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        debug!(
            "event=store_save module=store status=ok path={} records={}",
            self.path.display(),
            document.len()
        );
        Ok(())
    }
}

impl EntityStore for JsonFileStore {
    fn all(&self) -> Document {
        self.load()
    }

    fn get(&self, id: &str) -> Option<Record> {
        self.load().get(id).cloned()
    }

    fn upsert(&mut self, id: &str, record: Record) -> StoreResult<()> {
        let mut document = self.load();
        document.insert(id.to_string(), record);
        self.save(&document)
    }

    fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let mut document = self.load();
        // shift_remove keeps the insertion order of the surviving entries.
        if document.shift_remove(id).is_none() {
            return Ok(false);
        }
        self.save(&document)?;
        Ok(true)
    }
}
