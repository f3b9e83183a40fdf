//! Business-logic services over entity stores.
//!
//! # Responsibility
//! - Orchestrate model construction/validation and store calls into
//!   caller-facing CRUD/search operations.
//! - Keep callers on plain records; entities never cross this boundary.
//!
//! # Invariants
//! - Validation always runs before the store write, never after.
//! - A missing id is a value-level "not found", not an error.

use crate::model::ValidationError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contacts_service;
pub mod notes_service;

/// Failure surfaced by service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Entity input rejected before any write happened.
    Validation(ValidationError),
    /// Persistence write failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
