//! Proleptic Gregorian day-existence checks.
//!
//! Years use astronomical numbering: year 0 exists and is a leap year, and
//! `-44` is 45 BC. Years 0–99 are taken literally.

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, EXTENDED_YEAR_PREFIX, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_CHECKED_YEAR, MAX_MONTH, MIN_CHECKED_YEAR, MIN_DAY,
};

pub const fn is_leap_year(year: i64) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}

/// Number of days in `month` of `year`.
///
/// `month` must be in `1..=12`.
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Whether `year` lies inside the range where days are actually checked.
pub const fn is_checked_year(year: i64) -> bool {
    year >= MIN_CHECKED_YEAR && year <= MAX_CHECKED_YEAR
}

/// Returns true if the given day exists on the proleptic Gregorian calendar.
///
/// Years outside `MIN_CHECKED_YEAR..=MAX_CHECKED_YEAR` are always reported
/// as existing, whatever the month and day.
pub const fn date_exists(year: i64, month: u8, day: u8) -> bool {
    if !is_checked_year(year) {
        return true;
    }
    if month == 0 || month > MAX_MONTH {
        return false;
    }
    day >= MIN_DAY && day <= days_in_month(year, month)
}

/// Parses the numeric value of a year string such as `1999`, `-0044` or
/// `y12345`.
///
/// Returns `None` when the text is not a plain or extended year, or when it
/// does not fit in an `i64`.
pub fn year_value(year: &str) -> Option<i64> {
    let (negative, magnitude) = year.strip_prefix('-').map_or((false, year), |rest| (true, rest));
    let digits = magnitude.strip_prefix(EXTENDED_YEAR_PREFIX).unwrap_or(magnitude);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Day-existence check on textual components.
///
/// A year too large to parse lies far outside the checked range and is
/// assumed to exist. Unparseable month or day text never exists.
pub(crate) fn text_date_exists(year: &str, month: &str, day: &str) -> bool {
    let Some(year) = year_value(year) else {
        return true;
    };
    match (month.parse::<u8>(), day.parse::<u8>()) {
        (Ok(month), Ok(day)) => date_exists(year, month, day),
        _ => false,
    }
}
