//! Notes use-case service.
//!
//! # Responsibility
//! - Provide add/list/search/edit/delete over any `EntityStore` backend.
//! - Sort listings by the caller-selected key and keep ties in document
//!   insertion order.
//!
//! # Invariants
//! - `updated_at` advances only when an edit actually supplies a field.
//! - All sorts are stable, so equal keys keep storage iteration order.
//! - Tag matching is case-insensitive; stored tag casing is preserved.

use crate::dates::now_utc_stamp;
use crate::model::note::Note;
use crate::service::ServiceError;
use crate::store::{EntityStore, Record};
use crate::validation::split_tags;
use log::info;
use std::collections::BTreeSet;

/// Sort key for note listings. Unknown input falls back to `Created`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteSortKey {
    /// Most recently created first.
    #[default]
    Created,
    /// Most recently edited first.
    Updated,
    /// Case-insensitive text ascending.
    Text,
    /// Case-insensitive comma-joined tags ascending.
    Tags,
}

impl NoteSortKey {
    /// Parses a caller-supplied sort name, defaulting to `Created`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "updated" => Self::Updated,
            "text" => Self::Text,
            "tags" => Self::Tags,
            _ => Self::Created,
        }
    }
}

/// Partial update for one note.
///
/// An absent slot leaves the field unchanged. A present `text` slot
/// replaces the trimmed text; a present `tags` slot is a comma-separated
/// string replacing the whole tag list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub text: Option<String>,
    pub tags: Option<String>,
}

/// Note CRUD and query facade bound to one store for its lifetime.
pub struct NotesService<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> NotesService<S> {
    /// Creates a service using the provided store backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a validated note and persists it.
    pub fn add_note(
        &mut self,
        text: &str,
        tags_text: Option<&str>,
    ) -> Result<Record, ServiceError> {
        let note = Note::new(text, tags_text)?;
        let record = note.to_record();
        self.store.upsert(&note.id, record.clone())?;
        info!("event=note_add module=notes status=ok id={}", note.id);
        Ok(record)
    }

    /// Lists all notes sorted by the given key.
    pub fn list_notes(&self, sort: NoteSortKey) -> Vec<Record> {
        let mut notes = self.load_all();
        match sort {
            NoteSortKey::Created => notes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            NoteSortKey::Updated => notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            NoteSortKey::Text => notes.sort_by_key(|n| n.text.to_lowercase()),
            NoteSortKey::Tags => notes.sort_by_key(|n| n.tags.join(",").to_lowercase()),
        }
        notes.iter().map(Note::to_record).collect()
    }

    /// Case-insensitive substring search over text and tags, most
    /// recently edited first. An empty query matches everything.
    pub fn search_notes(&self, query: &str) -> Vec<Record> {
        let needle = query.trim().to_lowercase();
        let mut matches: Vec<Note> = self
            .load_all()
            .into_iter()
            .filter(|n| {
                let haystack = format!("{} {}", n.text, n.tags.join(",")).to_lowercase();
                haystack.contains(&needle)
            })
            .collect();
        matches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        matches.iter().map(Note::to_record).collect()
    }

    /// Notes whose tag set contains every query tag, case-insensitively,
    /// most recently edited first.
    ///
    /// An empty query set matches every note.
    pub fn search_by_tags(&self, tags: &[String]) -> Vec<Record> {
        let wanted: BTreeSet<String> = tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let mut matches: Vec<Note> = self
            .load_all()
            .into_iter()
            .filter(|n| {
                let have: BTreeSet<String> = n.tags.iter().map(|t| t.to_lowercase()).collect();
                wanted.is_subset(&have)
            })
            .collect();
        matches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        matches.iter().map(Note::to_record).collect()
    }

    /// Applies a partial edit to one note.
    ///
    /// Returns `Ok(None)` when the id is unknown. When at least one slot
    /// is supplied the note is re-validated, `updated_at` is stamped and
    /// the record written; an empty patch returns the unchanged record
    /// without touching the store or the timestamp.
    pub fn edit_note(&mut self, id: &str, patch: &NotePatch) -> Result<Option<Record>, ServiceError> {
        let Some(raw) = self.store.get(id) else {
            return Ok(None);
        };
        let mut note = Note::from_record(&raw);
        let mut changed = false;
        if let Some(text) = &patch.text {
            note.text = text.trim().to_string();
            changed = true;
        }
        if let Some(tags) = &patch.tags {
            note.tags = split_tags(tags);
            changed = true;
        }
        if changed {
            note.validate()?;
            note.updated_at = now_utc_stamp();
            self.store.upsert(id, note.to_record())?;
            info!("event=note_edit module=notes status=ok id={id}");
        }
        Ok(Some(note.to_record()))
    }

    /// Removes one note; returns whether a record existed.
    pub fn delete_note(&mut self, id: &str) -> Result<bool, ServiceError> {
        let existed = self.store.delete(id)?;
        info!("event=note_delete module=notes status=ok id={id} existed={existed}");
        Ok(existed)
    }

    fn load_all(&self) -> Vec<Note> {
        self.store.all().values().map(Note::from_record).collect()
    }
}
