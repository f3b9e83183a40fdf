//! Field validation and normalization helpers.
//!
//! # Responsibility
//! - Validate email and phone formats for contact fields.
//! - Normalize phone numbers to a canonical digit form.
//! - Split comma-separated tag input into clean tag lists.
//!
//! # Invariants
//! - Empty input is valid for optional fields (email, phone).
//! - `normalize_phone` output contains only digits plus an optional
//!   leading `+`.
//! - `split_tags` never yields empty strings.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

/// Checks email format against a `local@domain.tld` pattern.
///
/// Empty input is accepted because email is an optional field; presence
/// checks belong to the caller.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() {
        return true;
    }
    EMAIL_RE.is_match(email)
}

/// Normalizes a raw phone string to digits with an optional leading `+`.
///
/// Whitespace is trimmed first so `" +1 (555)"` keeps its plus sign.
pub fn normalize_phone(raw: &str) -> String {
    let cleaned = raw.trim();
    let digits: String = cleaned.chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}

/// Checks that a phone number normalizes to 7..=15 digits.
///
/// Empty input is accepted because phones are optional entries.
pub fn is_valid_phone(phone: &str) -> bool {
    if phone.is_empty() {
        return true;
    }
    let normalized = normalize_phone(phone);
    let digits = normalized.strip_prefix('+').unwrap_or(&normalized);
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
}

/// Splits comma-separated tag text into trimmed, non-empty tags.
pub fn split_tags(tags_text: &str) -> Vec<String> {
    tags_text
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
