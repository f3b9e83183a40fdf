//! Core domain logic for the personal assistant.
//! This crate is the single source of truth for contact/note invariants
//! and for the JSON-document persistence contract beneath them.

pub mod dates;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::Contact;
pub use model::note::Note;
pub use model::ValidationError;
pub use service::contacts_service::{ContactPatch, ContactsService};
pub use service::notes_service::{NotePatch, NoteSortKey, NotesService};
pub use service::ServiceError;
pub use store::json_store::JsonFileStore;
pub use store::{Document, EntityStore, MemoryStore, Record, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
