use assistant_core::{ContactPatch, ContactsService, EntityStore, MemoryStore, Record, ServiceError};
use chrono::NaiveDate;

fn service() -> ContactsService<MemoryStore> {
    ContactsService::new(MemoryStore::new())
}

fn field<'a>(record: &'a Record, key: &str) -> &'a str {
    record.get(key).and_then(|v| v.as_str()).unwrap_or_default()
}

fn phones(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|p| p.to_string()).collect()
}

#[test]
fn add_contact_normalizes_and_returns_record() {
    let mut contacts = service();
    let record = contacts
        .add_contact(
            " Alice ",
            Some("1 Main St"),
            &phones(&["+1 (555) 123-4567"]),
            Some("alice@example.com"),
            Some("1990-05-10"),
        )
        .unwrap();
    assert_eq!(field(&record, "name"), "Alice");
    assert_eq!(record["phones"], serde_json::json!(["+15551234567"]));
    assert!(!field(&record, "id").is_empty());
}

#[test]
fn add_contact_rejects_invalid_fields_before_any_write() {
    let mut contacts = service();
    let err = contacts
        .add_contact("Bob", None, &[], Some("not-an-email"), None)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // A phone with no digits normalizes to nothing and must be rejected,
    // not stored as an empty entry.
    let err = contacts
        .add_contact("Bob", None, &phones(&["not-a-number"]), None, None)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(contacts.list_contacts().is_empty());
}

#[test]
fn list_contacts_sorts_by_case_insensitive_name() {
    let mut contacts = service();
    contacts.add_contact("charlie", None, &[], None, None).unwrap();
    contacts.add_contact("Alice", None, &[], None, None).unwrap();
    contacts.add_contact("Bob", None, &[], None, None).unwrap();

    let names: Vec<String> = contacts
        .list_contacts()
        .iter()
        .map(|r| field(r, "name").to_string())
        .collect();
    assert_eq!(names, ["Alice", "Bob", "charlie"]);
}

#[test]
fn search_matches_any_field_and_empty_query_matches_all() {
    let mut contacts = service();
    contacts
        .add_contact("Alice", Some("Baker Street"), &[], None, None)
        .unwrap();
    contacts
        .add_contact("Bob", None, &phones(&["555-123-4567"]), None, None)
        .unwrap();

    let by_address = contacts.search_contacts("baker");
    assert_eq!(by_address.len(), 1);
    assert_eq!(field(&by_address[0], "name"), "Alice");

    let by_phone = contacts.search_contacts("5551234567");
    assert_eq!(by_phone.len(), 1);
    assert_eq!(field(&by_phone[0], "name"), "Bob");

    assert_eq!(contacts.search_contacts("").len(), 2);
    assert!(contacts.search_contacts("zzz").is_empty());
}

#[test]
fn edit_applies_only_supplied_fields_and_clears_on_empty() {
    let mut contacts = service();
    let record = contacts
        .add_contact(
            "Alice",
            Some("1 Main St"),
            &phones(&["5551234567"]),
            Some("alice@example.com"),
            None,
        )
        .unwrap();
    let id = field(&record, "id").to_string();

    let patch = ContactPatch {
        email: Some("  ".to_string()),
        phones: Some("+1 (555) 000-1111, 555.222.3333".to_string()),
        ..ContactPatch::default()
    };
    let edited = contacts.edit_contact(&id, &patch).unwrap().unwrap();
    assert_eq!(field(&edited, "name"), "Alice");
    assert_eq!(field(&edited, "address"), "1 Main St");
    assert_eq!(edited["email"], serde_json::Value::Null);
    assert_eq!(
        edited["phones"],
        serde_json::json!(["+15550001111", "5552223333"])
    );
}

#[test]
fn edit_with_invalid_phone_fails_and_leaves_stored_record_unchanged() {
    let mut contacts = service();
    let record = contacts
        .add_contact("Alice", None, &phones(&["5551234567"]), None, None)
        .unwrap();
    let id = field(&record, "id").to_string();

    let patch = ContactPatch {
        phones: Some("not-a-number".to_string()),
        ..ContactPatch::default()
    };
    let err = contacts.edit_contact(&id, &patch).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let listed = contacts.list_contacts();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["phones"], serde_json::json!(["5551234567"]));
}

#[test]
fn edit_unknown_id_reports_not_found_without_error() {
    let mut contacts = service();
    let outcome = contacts
        .edit_contact("missing", &ContactPatch::default())
        .unwrap();
    assert_eq!(outcome, None);
}

#[test]
fn delete_reports_whether_a_record_existed() {
    let mut contacts = service();
    let record = contacts.add_contact("Alice", None, &[], None, None).unwrap();
    let id = field(&record, "id").to_string();

    assert!(contacts.delete_contact(&id).unwrap());
    assert!(!contacts.delete_contact(&id).unwrap());
    assert!(contacts.list_contacts().is_empty());
}

#[test]
fn leap_day_birthday_maps_to_feb_28_in_non_leap_years() {
    let mut contacts = service();
    contacts
        .add_contact("Alice", None, &[], None, Some("1992-02-29"))
        .unwrap();

    // 2023 has no Feb 29; from Feb 27 the birthday lands on 2023-02-28.
    let today = NaiveDate::from_ymd_opt(2023, 2, 27).unwrap();
    let upcoming = contacts.birthdays_in_as_of(7, today);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(field(&upcoming[0], "name"), "Alice");
    assert_eq!(upcoming[0]["days_until_birthday"], serde_json::json!(1));
}

#[test]
fn birthdays_window_is_inclusive_and_sorted_by_days_then_name() {
    let mut contacts = service();
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    contacts
        .add_contact("Zoe", None, &[], None, Some("1990-06-01"))
        .unwrap();
    contacts
        .add_contact("bella", None, &[], None, Some("1985-06-03"))
        .unwrap();
    contacts
        .add_contact("Adam", None, &[], None, Some("1991-06-03"))
        .unwrap();
    contacts
        .add_contact("Far", None, &[], None, Some("1991-07-30"))
        .unwrap();
    contacts.add_contact("NoBday", None, &[], None, None).unwrap();

    let upcoming = contacts.birthdays_in_as_of(7, today);
    let names: Vec<String> = upcoming
        .iter()
        .map(|r| field(r, "name").to_string())
        .collect();
    // Zoe is today (inclusive lower bound), then the two June 3rd
    // birthdays tie on days and order by lowercase name.
    assert_eq!(names, ["Zoe", "Adam", "bella"]);
    assert_eq!(upcoming[0]["days_until_birthday"], serde_json::json!(0));
}

#[test]
fn contacts_with_unparseable_birthdays_are_skipped_silently() {
    // A legacy record with a malformed birthday enters through the store
    // directly, bypassing construction-time validation.
    let mut store = MemoryStore::new();
    store
        .upsert(
            "legacy",
            serde_json::json!({ "id": "legacy", "name": "Broken", "birthday": "06/15/1990" }),
        )
        .unwrap();
    let mut contacts = ContactsService::new(store);
    contacts
        .add_contact("Alice", None, &[], None, Some("1990-06-05"))
        .unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let upcoming = contacts.birthdays_in_as_of(30, today);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(field(&upcoming[0], "name"), "Alice");
}
