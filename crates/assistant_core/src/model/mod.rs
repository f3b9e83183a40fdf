//! Domain entities for the assistant core.
//!
//! # Responsibility
//! - Define the Contact and Note records plus their shared validation error.
//! - Keep construction strict and loading tolerant, so invalid input never
//!   reaches storage while legacy records remain readable.
//!
//! # Invariants
//! - Entity ids are opaque strings, stable for the entity lifetime.
//! - `validate()` runs before every persistence write, never after.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contact;
pub mod note;

/// Domain validation failure raised at construction or pre-save checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Contact name is empty after trimming.
    EmptyName,
    /// Email does not match the accepted address format.
    InvalidEmail(String),
    /// Phone does not normalize to an accepted digit count.
    InvalidPhone(String),
    /// Birthday is not a parseable `YYYY-MM-DD` date.
    InvalidBirthday(String),
    /// Note text is empty after trimming.
    EmptyText,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "contact name is required"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::InvalidPhone(value) => write!(f, "invalid phone number: `{value}`"),
            Self::InvalidBirthday(value) => {
                write!(f, "birthday must be a YYYY-MM-DD date, got `{value}`")
            }
            Self::EmptyText => write!(f, "note text cannot be empty"),
        }
    }
}

impl Error for ValidationError {}
