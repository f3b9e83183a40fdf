//! Contacts use-case service.
//!
//! # Responsibility
//! - Provide add/list/search/edit/delete and upcoming-birthday queries
//!   over any `EntityStore` backend.
//! - Apply partial edits with explicit omitted-vs-clear semantics.
//!
//! # Invariants
//! - Every mutation validates the full contact before the single store
//!   write; a rejected edit leaves the stored record untouched.
//! - List and search results are sorted by lowercase name ascending.
//! - Records returned to callers are plain data, never entities.

use crate::dates::{days_until_next_birthday, parse_date};
use crate::model::contact::Contact;
use crate::service::ServiceError;
use crate::store::{EntityStore, Record};
use chrono::{NaiveDate, Utc};
use log::info;
use serde_json::json;

/// Partial update for one contact.
///
/// An absent slot leaves the field unchanged. A present slot overwrites:
/// for `address`/`email`/`birthday` a value that trims to empty clears
/// the field, and `phones` is a comma-separated string replacing the
/// whole phone list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
    pub phones: Option<String>,
}

/// Contact CRUD and query facade bound to one store for its lifetime.
pub struct ContactsService<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> ContactsService<S> {
    /// Creates a service using the provided store backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a validated contact and persists it.
    ///
    /// Fails with a validation error before any write when a field is
    /// rejected.
    pub fn add_contact(
        &mut self,
        name: &str,
        address: Option<&str>,
        phones: &[String],
        email: Option<&str>,
        birthday: Option<&str>,
    ) -> Result<Record, ServiceError> {
        let contact = Contact::new(name, address, phones, email, birthday)?;
        let record = contact.to_record();
        self.store.upsert(&contact.id, record.clone())?;
        info!(
            "event=contact_add module=contacts status=ok id={}",
            contact.id
        );
        Ok(record)
    }

    /// Lists all contacts sorted by case-insensitive name.
    pub fn list_contacts(&self) -> Vec<Record> {
        let mut contacts: Vec<Contact> = self
            .store
            .all()
            .values()
            .map(Contact::from_record)
            .collect();
        contacts.sort_by_key(|c| c.name.to_lowercase());
        contacts.iter().map(Contact::to_record).collect()
    }

    /// Case-insensitive substring search over every contact field.
    ///
    /// An empty query matches everything.
    pub fn search_contacts(&self, query: &str) -> Vec<Record> {
        let needle = query.trim().to_lowercase();
        let mut matches: Vec<Contact> = self
            .store
            .all()
            .values()
            .map(Contact::from_record)
            .filter(|c| contact_haystack(c).contains(&needle))
            .collect();
        matches.sort_by_key(|c| c.name.to_lowercase());
        matches.iter().map(Contact::to_record).collect()
    }

    /// Applies a partial edit to one contact.
    ///
    /// Returns `Ok(None)` when the id is unknown. The patched contact is
    /// re-normalized and re-validated before the write, so an invalid
    /// edit fails without changing the stored record.
    pub fn edit_contact(
        &mut self,
        id: &str,
        patch: &ContactPatch,
    ) -> Result<Option<Record>, ServiceError> {
        let Some(raw) = self.store.get(id) else {
            return Ok(None);
        };
        let mut contact = Contact::from_record(&raw);
        if let Some(name) = &patch.name {
            contact.name = name.trim().to_string();
        }
        if let Some(address) = &patch.address {
            contact.address = cleared_or_value(address);
        }
        if let Some(email) = &patch.email {
            contact.email = cleared_or_value(email);
        }
        if let Some(birthday) = &patch.birthday {
            contact.birthday = cleared_or_value(birthday);
        }
        if let Some(phones) = &patch.phones {
            contact.phones = phones
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }
        contact.normalize();
        contact.validate()?;
        let record = contact.to_record();
        self.store.upsert(id, record.clone())?;
        info!("event=contact_edit module=contacts status=ok id={id}");
        Ok(Some(record))
    }

    /// Removes one contact; returns whether a record existed.
    pub fn delete_contact(&mut self, id: &str) -> Result<bool, ServiceError> {
        let existed = self.store.delete(id)?;
        info!("event=contact_delete module=contacts status=ok id={id} existed={existed}");
        Ok(existed)
    }

    /// Contacts whose next birthday falls within `days` from today.
    pub fn birthdays_in(&self, days: i64) -> Vec<Record> {
        self.birthdays_in_as_of(days, Utc::now().date_naive())
    }

    /// `birthdays_in` against an explicit `today`, for deterministic
    /// callers and tests.
    ///
    /// Each returned record carries an extra `days_until_birthday` field.
    /// Contacts without a parseable birthday are skipped. Results are
    /// sorted by (days remaining, lowercase name); the lower bound is
    /// inclusive, so a birthday today is reported.
    pub fn birthdays_in_as_of(&self, days: i64, today: NaiveDate) -> Vec<Record> {
        let mut upcoming: Vec<(i64, String, Record)> = Vec::new();
        for raw in self.store.all().values() {
            let contact = Contact::from_record(raw);
            let Some(birthday) = contact.birthday.as_deref().and_then(parse_date) else {
                continue;
            };
            let remaining = days_until_next_birthday(birthday, today);
            if (0..=days).contains(&remaining) {
                let mut record = contact.to_record();
                record["days_until_birthday"] = json!(remaining);
                upcoming.push((remaining, contact.name.to_lowercase(), record));
            }
        }
        upcoming.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        upcoming.into_iter().map(|(_, _, record)| record).collect()
    }
}

fn cleared_or_value(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn contact_haystack(contact: &Contact) -> String {
    [
        contact.name.as_str(),
        contact.address.as_deref().unwrap_or_default(),
        &contact.phones.join(" "),
        contact.email.as_deref().unwrap_or_default(),
        contact.birthday.as_deref().unwrap_or_default(),
    ]
    .join(" ")
    .to_lowercase()
}
