//! Contact entity.
//!
//! # Responsibility
//! - Construct validated contacts from caller-parsed field input.
//! - Reconstruct contacts tolerantly from stored records.
//! - Project contacts to the plain record form used by storage and callers.
//!
//! # Invariants
//! - `new` never yields a contact that fails `validate()`.
//! - Stored phones are always in normalized form.
//! - Optional fields that trim to empty are kept as absent, never as `""`.

use crate::dates::parse_date;
use crate::model::ValidationError;
use crate::validation::{is_valid_email, is_valid_phone, normalize_phone};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Address-book entry keyed by an opaque generated id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Stable opaque id, generated at creation.
    pub id: String,
    /// Display name, required and non-empty.
    pub name: String,
    pub address: Option<String>,
    /// Normalized phone numbers in insertion/edit order, repeats allowed.
    pub phones: Vec<String>,
    pub email: Option<String>,
    /// Birthday in `YYYY-MM-DD` form.
    pub birthday: Option<String>,
}

impl Contact {
    /// Builds a validated contact from parsed field input.
    ///
    /// # Contract
    /// - Trims every string field; optional fields that trim empty become
    ///   absent.
    /// - Drops empty phone entries, normalizes the rest.
    /// - Fails before any id leaves this function if validation rejects
    ///   the input, so invalid contacts never reach storage.
    pub fn new(
        name: &str,
        address: Option<&str>,
        phones: &[String],
        email: Option<&str>,
        birthday: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let mut contact = Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            address: trimmed_or_none(address),
            phones: phones.iter().filter(|p| !p.trim().is_empty()).cloned().collect(),
            email: trimmed_or_none(email),
            birthday: trimmed_or_none(birthday),
        };
        contact.normalize();
        contact.validate()?;
        Ok(contact)
    }

    /// Reconstructs a contact from a stored record without validating.
    ///
    /// Missing or mistyped fields degrade to defaults so legacy records
    /// stay loadable; validation is deferred to the next save.
    pub fn from_record(record: &Value) -> Self {
        let mut contact = Self {
            id: str_field(record, "id"),
            name: str_field(record, "name"),
            address: opt_str_field(record, "address"),
            phones: str_list_field(record, "phones"),
            email: opt_str_field(record, "email"),
            birthday: opt_str_field(record, "birthday"),
        };
        contact.normalize();
        contact
    }

    /// Projects this contact to its plain record form.
    pub fn to_record(&self) -> Value {
        serde_json::to_value(self).expect("contact serializes to a json object")
    }

    /// Re-normalizes phone entries, dropping any that became empty.
    pub fn normalize(&mut self) {
        self.phones = self
            .phones
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| normalize_phone(p))
            .collect();
    }

    /// Checks every stored-contact invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err(ValidationError::InvalidEmail(email.clone()));
            }
        }
        for phone in &self.phones {
            // A stored phone that is empty can only be garbage input that
            // normalized to no digits; raw empties are filtered earlier.
            if phone.is_empty() || !is_valid_phone(phone) {
                return Err(ValidationError::InvalidPhone(phone.clone()));
            }
        }
        if let Some(birthday) = &self.birthday {
            if parse_date(birthday).is_none() {
                return Err(ValidationError::InvalidBirthday(birthday.clone()));
            }
        }
        Ok(())
    }
}

fn trimmed_or_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn str_field(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn opt_str_field(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn str_list_field(record: &Value, key: &str) -> Vec<String> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
