//! Grammar checks for single EDTF dates and two-endpoint intervals.

use std::sync::LazyLock;

use regex::Regex;

use crate::calendar::text_date_exists;
use crate::consts::{
    APPROXIMATE_MARKER, DATE_SEPARATOR, FIRST_SEASON, INTERVAL_SEPARATOR, JANUARY, LAST_SEASON,
    MAX_DAY, MAX_MONTH, MIN_DAY, OPEN, UNCERTAIN_MARKER, UNKNOWN, UNSPECIFIED_PART,
};

/// A year with every digit known: up to four digits, or `y` and five or more.
static KNOWN_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:[0-9]{1,4}|y[0-9]{5,})$").expect("valid regex"));

/// A short year whose low-order digits may be unspecified (`19uu`, `199u`, `uu`).
static UNCLEAR_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]{0,2}(?:[0-9]{2}|[0-9]u|uu)$").expect("valid regex"));

/// Two digits, or fully unspecified.
static UNCLEAR_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]{2}|uu)$").expect("valid regex"));

static TWO_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{2}$").expect("valid regex"));

/// Returns true if `year` is a single EDTF year, known or partly unspecified.
pub(crate) fn is_year(year: &str) -> bool {
    UNCLEAR_YEAR.is_match(year) || KNOWN_YEAR.is_match(year)
}

/// Splits a date into its body and its trailing run of `?`/`~` markers.
pub(crate) fn split_markers(date: &str) -> (&str, &str) {
    let body = date.trim_end_matches([UNCERTAIN_MARKER, APPROXIMATE_MARKER]);
    (body, &date[body.len()..])
}

/// A trailing marker run holds at most one `?` and at most one `~`.
fn valid_marker_run(markers: &str) -> bool {
    markers.matches(UNCERTAIN_MARKER).count() <= 1 && markers.matches(APPROXIMATE_MARKER).count() <= 1
}

/// Splits a marker-free date body on `-`, keeping a leading sign with the
/// year.
pub(crate) fn split_components(body: &str) -> Vec<&str> {
    let Some(unsigned) = body.strip_prefix(DATE_SEPARATOR) else {
        return body.split(DATE_SEPARATOR).collect();
    };

    let mut parts: Vec<&str> = unsigned.split(DATE_SEPARATOR).collect();
    // The first part always exists; re-attach the sign by slicing the original.
    let first_len = parts[0].len() + DATE_SEPARATOR.len_utf8();
    parts[0] = &body[..first_len];
    parts
}

fn has_digit(part: &str) -> bool {
    part.bytes().any(|b| b.is_ascii_digit())
}

/// Numeric value of a two-character part, or `None` for `uu`.
fn numeric(part: &str) -> Option<u8> {
    if part == UNSPECIFIED_PART || !has_digit(part) {
        return None;
    }
    part.parse().ok()
}

fn is_month_code(value: u8) -> bool {
    (JANUARY..=MAX_MONTH).contains(&value) || (FIRST_SEASON..=LAST_SEASON).contains(&value)
}

fn valid_year_month(year: &str, month: &str) -> bool {
    if !KNOWN_YEAR.is_match(year) || !UNCLEAR_PART.is_match(month) {
        return false;
    }
    numeric(month).is_none_or(is_month_code)
}

fn valid_year_month_day(year: &str, month: &str, day: &str) -> bool {
    if !KNOWN_YEAR.is_match(year) {
        return false;
    }
    let shape = (TWO_DIGITS.is_match(month) && UNCLEAR_PART.is_match(day))
        || (month == UNSPECIFIED_PART && day == UNSPECIFIED_PART);
    if !shape {
        return false;
    }
    if numeric(month).is_some_and(|m| !(JANUARY..=MAX_MONTH).contains(&m)) {
        return false;
    }
    match numeric(day) {
        Some(d) => (MIN_DAY..=MAX_DAY).contains(&d) && text_date_exists(year, month, day),
        None => true,
    }
}

/// Returns true if `date` is a well-formed single EDTF date, such as
/// `2004`, `19uu`, `2004-06~`, `1977-23` or `2004-02-29?`.
pub fn validate_single(date: &str) -> bool {
    let (body, markers) = split_markers(date);
    if !valid_marker_run(markers) {
        return false;
    }
    match split_components(body).as_slice() {
        [year] => is_year(year),
        [year, month] => valid_year_month(year, month),
        [year, month, day] => valid_year_month_day(year, month, day),
        _ => false,
    }
}

/// Returns true if `text` is a well-formed EDTF date or interval.
///
/// An interval has exactly two non-empty endpoints separated by `/`. The
/// start may be `unknown`; the end may be `open` or `unknown`.
pub fn validate(text: &str) -> bool {
    let parts: Vec<&str> = text.split(INTERVAL_SEPARATOR).collect();
    match parts.as_slice() {
        [single] => validate_single(single),
        [start, end] => {
            !start.is_empty()
                && !end.is_empty()
                && (validate_single(start) || *start == UNKNOWN)
                && (validate_single(end) || *end == OPEN || *end == UNKNOWN)
        },
        _ => false,
    }
}
