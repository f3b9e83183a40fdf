//! Note entity.
//!
//! # Responsibility
//! - Construct validated notes with creation/update timestamps.
//! - Reconstruct notes tolerantly from stored records.
//! - Project notes to the plain record form used by storage and callers.
//!
//! # Invariants
//! - `created_at` is fixed at creation; `updated_at` moves only through
//!   the owning service's edit path.
//! - The tag list never contains empty strings.

use crate::dates::now_utc_stamp;
use crate::model::ValidationError;
use crate::validation::split_tags;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Free-form note with tags and UTC second-precision timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Stable opaque id, generated at creation.
    pub id: String,
    /// Note body, required and non-empty.
    pub text: String,
    /// Tags in insertion order; matching treats them case-insensitively.
    pub tags: Vec<String>,
    /// Creation stamp, `YYYY-MM-DDTHH:MM:SSZ`.
    pub created_at: String,
    /// Last-edit stamp, same form as `created_at`.
    pub updated_at: String,
}

impl Note {
    /// Builds a validated note, stamping both timestamps to now.
    pub fn new(text: &str, tags_text: Option<&str>) -> Result<Self, ValidationError> {
        let now = now_utc_stamp();
        let note = Self {
            id: Uuid::new_v4().to_string(),
            text: text.trim().to_string(),
            tags: split_tags(tags_text.unwrap_or_default()),
            created_at: now.clone(),
            updated_at: now,
        };
        note.validate()?;
        Ok(note)
    }

    /// Reconstructs a note from a stored record without validating.
    ///
    /// Missing timestamps fall back to now; empty tag entries are dropped
    /// so the no-empty-tags invariant holds even for legacy records.
    pub fn from_record(record: &Value) -> Self {
        Self {
            id: str_field(record, "id"),
            text: str_field(record, "text"),
            tags: tag_list_field(record),
            created_at: stamp_field(record, "created_at"),
            updated_at: stamp_field(record, "updated_at"),
        }
    }

    /// Projects this note to its plain record form.
    pub fn to_record(&self) -> Value {
        serde_json::to_value(self).expect("note serializes to a json object")
    }

    /// Checks the stored-note invariant; re-run after in-place edits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(())
    }
}

fn str_field(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn stamp_field(record: &Value, key: &str) -> String {
    match record.get(key).and_then(Value::as_str) {
        Some(stamp) if !stamp.is_empty() => stamp.to_string(),
        _ => now_utc_stamp(),
    }
}

fn tag_list_field(record: &Value) -> Vec<String> {
    record
        .get("tags")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
