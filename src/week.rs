//! ISO week and date helpers.
//!
//! Release schedules are expressed in ISO-8601 week numbers. This module
//! converts between `(year, week)` pairs and calendar dates, and provides
//! the loose parsing used by constraint normalization. The parsing
//! functions never fail: unusable input maps to documented sentinels.

use chrono::{DateTime, Datelike, Days, NaiveDate, Weekday};
use serde_json::Value;

/// Sentinel returned by [`coerce_int`] for input that is not an integer.
pub const INVALID_INT: i64 = -1;

/// Date formats accepted by [`parse_week`] for date-string input,
/// tried in order after RFC 3339.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// Date of the Monday of the given ISO week.
///
/// Follows the ISO-8601 week-numbering rule (week 1 is the week containing
/// the year's first Thursday). Returns `None` when the week number does not
/// exist in that year; weeks 1 through 52 exist in every ISO year, so
/// callers that keep weeks in range never see `None`.
#[must_use]
pub fn monday_of(year: i32, week: u32) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
}

/// Like [`monday_of`], but extends past the year's last week
/// arithmetically: week 53 of a 52-week year resolves to the Monday seven
/// days after week 52, which is week 1 of the following year. Weeks the
/// year does contain resolve identically to [`monday_of`].
#[must_use]
pub fn monday_of_extended(year: i32, week: u32) -> Option<NaiveDate> {
    if let Some(monday) = monday_of(year, week) {
        return Some(monday);
    }
    let weeks_past = u64::from(week.checked_sub(1)?);
    monday_of(year, 1)?.checked_add_days(Days::new(weeks_past * 7))
}

/// ISO `(year, week)` pair for a date. Inverse of [`monday_of`] for Mondays.
#[must_use]
pub fn iso_week_of(date: NaiveDate) -> (i32, u32) {
    let iso = date.iso_week();
    (iso.year(), iso.week())
}

/// Parse a loosely-typed JSON value into a week number.
///
/// An integer (or digit string) in `1..=52` is returned as-is. Any other
/// string is tried as a date and resolved to its ISO week number. Input
/// that is neither yields week 1.
#[must_use]
pub fn parse_week(input: &Value) -> u32 {
    let n = coerce_int(input);
    if (1..=52).contains(&n) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return n as u32;
    }
    input
        .as_str()
        .and_then(parse_date_loose)
        .map_or(1, |date| date.iso_week().week())
}

/// Coerce a loosely-typed JSON value into an integer.
///
/// Accepts JSON integers and strings of an optional leading `-` followed by
/// ASCII digits. Everything else — floats, booleans, out-of-range digit
/// strings — yields [`INVALID_INT`].
#[must_use]
pub fn coerce_int(input: &Value) -> i64 {
    match input {
        Value::Number(n) => n.as_i64().unwrap_or(INVALID_INT),
        Value::String(s) => coerce_int_str(s),
        _ => INVALID_INT,
    }
}

/// String flavor of [`coerce_int`], used for JSON object keys.
#[must_use]
pub fn coerce_int_str(s: &str) -> i64 {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return INVALID_INT;
    }
    s.parse().unwrap_or(INVALID_INT)
}

/// Try a handful of common date formats, most specific first.
fn parse_date_loose(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
