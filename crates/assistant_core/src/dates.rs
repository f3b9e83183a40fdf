//! Calendar date and timestamp helpers.
//!
//! # Responsibility
//! - Parse and format the strict `YYYY-MM-DD` date form used by records.
//! - Compute the distance in days to the next occurrence of a birthday.
//! - Produce the second-precision UTC stamps used by note timestamps.
//!
//! # Invariants
//! - Parse failure yields `None`, never a panic or error value; callers
//!   treat "no date" and "bad date" the same way.
//! - February 29 maps to February 28 in years without a leap day.

use chrono::{Datelike, NaiveDate, Utc};

const DATE_FMT: &str = "%Y-%m-%d";
const TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parses a strict `YYYY-MM-DD` date, returning `None` on any mismatch.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FMT).ok()
}

/// Formats a date in the canonical `YYYY-MM-DD` record form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

/// Current UTC time in the second-precision `...Z` form used by note
/// timestamps. Lexicographic order of these stamps equals time order.
pub fn now_utc_stamp() -> String {
    Utc::now().format(TIMESTAMP_FMT).to_string()
}

/// Returns days from `today` until the next occurrence of `birthday`.
///
/// The next occurrence is this year's month/day when it has not passed
/// yet, otherwise next year's. A February 29 birthday falls back to
/// February 28 in target years without a leap day. Result is `0` when
/// the birthday is today.
pub fn days_until_next_birthday(birthday: NaiveDate, today: NaiveDate) -> i64 {
    let mut next = birthday_in_year(birthday, today.year());
    if next < today {
        next = birthday_in_year(birthday, today.year() + 1);
    }
    (next - today).num_days()
}

fn birthday_in_year(birthday: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .expect("february 28 exists in every year")
}

#[cfg(test)]
mod tests {
    use super::{days_until_next_birthday, format_date, now_utc_stamp, parse_date};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_accepts_iso_dates_only() {
        assert_eq!(parse_date("1990-02-28"), Some(date(1990, 2, 28)));
        assert_eq!(parse_date("28.02.1990"), None);
        assert_eq!(parse_date("1990-02-30"), None);
        assert_eq!(parse_date("1990-02-28 extra"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn format_round_trips_parse() {
        let d = parse_date("2001-12-09").unwrap();
        assert_eq!(format_date(d), "2001-12-09");
    }

    #[test]
    fn utc_stamp_has_second_precision_and_z_suffix() {
        let stamp = now_utc_stamp();
        assert_eq!(stamp.len(), "2026-01-02T03:04:05Z".len());
        assert!(stamp.ends_with('Z'));
    }

    #[test]
    fn birthday_later_this_year_counts_forward() {
        let days = days_until_next_birthday(date(1990, 5, 10), date(2024, 5, 1));
        assert_eq!(days, 9);
    }

    #[test]
    fn birthday_already_passed_rolls_to_next_year() {
        let days = days_until_next_birthday(date(1990, 1, 2), date(2024, 1, 3));
        assert_eq!(days, 365);
    }

    #[test]
    fn birthday_today_is_zero_days_away() {
        assert_eq!(days_until_next_birthday(date(1990, 6, 15), date(2024, 6, 15)), 0);
    }

    #[test]
    fn feb_29_maps_to_feb_28_in_non_leap_years() {
        // 2024-02-29 exists, so from 2024-02-27 the leap birthday is 2 days out.
        assert_eq!(days_until_next_birthday(date(1992, 2, 29), date(2024, 2, 27)), 2);
        // 2025 has no leap day; the next occurrence collapses to 2025-02-28.
        assert_eq!(days_until_next_birthday(date(1992, 2, 29), date(2025, 2, 1)), 27);
    }
}
