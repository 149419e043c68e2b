use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::calendar::{is_checked_year, text_date_exists, year_value};
use crate::consts::{
    APPROXIMATE_MARKER, DATE_SEPARATOR, JANUARY, MAX_DAY, MIN_DAY, OPEN, UNCERTAIN_MARKER, UNKNOWN,
    UNSPECIFIED_DIGIT, UNSPECIFIED_PART,
};
use crate::types::Period;
use crate::validate::{is_year, split_components, split_markers, validate_single};
use crate::EdtfError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Value {
    Open,
    Unknown,
    Calendar {
        year:  String,
        month: Option<String>,
        day:   Option<String>,
    },
}

/// A single EDTF date, or an `open`/`unknown` interval endpoint.
///
/// Month and day are kept as their two-character EDTF text so that
/// unspecified (`uu`) values survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdtfDate {
    value:       Value,
    uncertain:   bool,
    approximate: bool,
}

impl EdtfDate {
    /// Creates a date from textual components.
    ///
    /// # Errors
    /// Returns an error if the year is not an EDTF year, if month or day is
    /// not exactly two characters in range (or `uu`), if a day is given
    /// without a month or with a season code, or if a fully known date does
    /// not exist in the calendar (`2003-02-29`).
    pub fn new(
        year: &str,
        month: Option<&str>,
        day: Option<&str>,
        uncertain: bool,
        approximate: bool,
    ) -> Result<Self, EdtfError> {
        if !is_year(year) {
            return Err(EdtfError::InvalidYear(year.to_owned()));
        }
        let season = month.map(Self::check_month).transpose()?.flatten().is_some_and(Period::is_season);
        if let Some(day) = day {
            let Some(month) = month else {
                return Err(EdtfError::DayWithoutMonth(day.to_owned()));
            };
            if season {
                return Err(EdtfError::DayWithSeason(month.to_owned()));
            }
            Self::check_day(day)?;
            let known = month != UNSPECIFIED_PART && day != UNSPECIFIED_PART;
            if known && !text_date_exists(year, month, day) {
                return Err(EdtfError::NoSuchDate(format!("{year}{DATE_SEPARATOR}{month}{DATE_SEPARATOR}{day}")));
            }
        }

        Ok(Self {
            value: Value::Calendar {
                year:  year.to_owned(),
                month: month.map(str::to_owned),
                day:   day.map(str::to_owned),
            },
            uncertain,
            approximate,
        })
    }

    /// An open-ended interval endpoint.
    pub const fn open() -> Self {
        Self {
            value:       Value::Open,
            uncertain:   false,
            approximate: false,
        }
    }

    /// An interval endpoint whose value is not stated.
    pub const fn unknown() -> Self {
        Self {
            value:       Value::Unknown,
            uncertain:   false,
            approximate: false,
        }
    }

    /// Validates a month slot, returning its period unless it is `uu`.
    fn check_month(month: &str) -> Result<Option<Period>, EdtfError> {
        if month == UNSPECIFIED_PART {
            return Ok(None);
        }
        let invalid = || EdtfError::InvalidMonth(month.to_owned());
        if month.len() != 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let code = month.parse::<u8>().map_err(|_| invalid())?;
        Period::from_code(code).map(Some).ok_or_else(invalid)
    }

    fn check_day(day: &str) -> Result<(), EdtfError> {
        if day == UNSPECIFIED_PART {
            return Ok(());
        }
        let invalid = || EdtfError::InvalidDay(day.to_owned());
        if day.len() != 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value = day.parse::<u8>().map_err(|_| invalid())?;
        if (MIN_DAY..=MAX_DAY).contains(&value) {
            Ok(())
        } else {
            Err(invalid())
        }
    }

    /// Returns the year text, absent for `open`/`unknown`
    pub fn year(&self) -> Option<&str> {
        match &self.value {
            Value::Calendar { year, .. } => Some(year),
            Value::Open | Value::Unknown => None,
        }
    }

    /// Returns the two-character month text if present
    pub fn month(&self) -> Option<&str> {
        match &self.value {
            Value::Calendar { month, .. } => month.as_deref(),
            Value::Open | Value::Unknown => None,
        }
    }

    /// Returns the two-character day text if present
    pub fn day(&self) -> Option<&str> {
        match &self.value {
            Value::Calendar { day, .. } => day.as_deref(),
            Value::Open | Value::Unknown => None,
        }
    }

    /// Returns the month as a calendar month or season, if it is specified
    pub fn period(&self) -> Option<Period> {
        self.month().and_then(|m| m.parse::<u8>().ok()).and_then(Period::from_code)
    }

    pub const fn is_uncertain(&self) -> bool {
        self.uncertain
    }

    pub const fn is_approximate(&self) -> bool {
        self.approximate
    }

    pub const fn is_open(&self) -> bool {
        matches!(self.value, Value::Open)
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self.value, Value::Unknown)
    }

    /// Canonical EDTF text; the same as `Display`.
    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }

    /// Pins this date to one calendar day.
    ///
    /// A missing or unspecified month gives January 1st, a season gives its
    /// representative day (northern hemisphere), and a month without a known
    /// day gives its first day.
    ///
    /// Returns `None` for `open`/`unknown`, for years with unspecified
    /// digits, for years outside the checked calendar range, and for years
    /// beyond what `chrono::NaiveDate` can hold.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let Value::Calendar { year, day, .. } = &self.value else {
            return None;
        };
        if year.contains(UNSPECIFIED_DIGIT) {
            return None;
        }
        let year = year_value(year).filter(|y| is_checked_year(*y))?;

        let (month, day) = match self.period() {
            None => (JANUARY, MIN_DAY),
            Some(period) if period.is_season() => period.representative_day(),
            Some(period) => {
                let day = day.as_deref().and_then(|d| d.parse::<u8>().ok()).unwrap_or(MIN_DAY);
                (period.code(), day)
            },
        };

        NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, u32::from(month), u32::from(day))
    }

    /// Midnight UTC of [`Self::to_naive_date`].
    pub fn to_timestamp(&self) -> Option<DateTime<Utc>> {
        self.to_naive_date().map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }
}

impl fmt::Display for EdtfDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Value::Calendar { year, month, day } = &self.value else {
            return f.write_str(if self.is_open() { OPEN } else { UNKNOWN });
        };

        f.write_str(year)?;
        for part in [month, day].into_iter().flatten() {
            write!(f, "{DATE_SEPARATOR}{part}")?;
        }
        if self.uncertain {
            write!(f, "{UNCERTAIN_MARKER}")?;
        }
        if self.approximate {
            write!(f, "{APPROXIMATE_MARKER}")?;
        }
        Ok(())
    }
}

/// Decomposes a strictly valid single EDTF date, or `open`/`unknown`.
///
/// # Errors
/// Returns `EdtfError::InvalidGrammar` if `text` is not a valid single date.
pub fn parse_strict(text: &str) -> Result<EdtfDate, EdtfError> {
    match text {
        OPEN => return Ok(EdtfDate::open()),
        UNKNOWN => return Ok(EdtfDate::unknown()),
        _ => {},
    }
    if !validate_single(text) {
        return Err(EdtfError::InvalidGrammar(text.to_owned()));
    }

    let (body, markers) = split_markers(text);
    let parts = split_components(body);
    EdtfDate::new(
        parts[0],
        parts.get(1).copied(),
        parts.get(2).copied(),
        markers.contains(UNCERTAIN_MARKER),
        markers.contains(APPROXIMATE_MARKER),
    )
}

impl FromStr for EdtfDate {
    type Err = EdtfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_strict(s)
    }
}

impl serde::Serialize for EdtfDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for EdtfDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, naive};

    #[test]
    fn test_parse_year_only() {
        let d = parse_strict("2004").unwrap();
        assert_eq!(d.year(), Some("2004"));
        assert_eq!(d.month(), None);
        assert_eq!(d.day(), None);
        assert!(!d.is_uncertain());
        assert!(!d.is_approximate());
        assert!(!d.is_open());
        assert!(!d.is_unknown());
    }

    #[test]
    fn test_parse_full_date_with_markers() {
        let d = parse_strict("2004-06-11?~").unwrap();
        assert_eq!(d.year(), Some("2004"));
        assert_eq!(d.month(), Some("06"));
        assert_eq!(d.day(), Some("11"));
        assert!(d.is_uncertain());
        assert!(d.is_approximate());
    }

    #[test]
    fn test_parse_season() {
        let d = parse_strict("1977-23").unwrap();
        assert_eq!(d.month(), Some("23"));
        assert_eq!(d.day(), None);
        assert_eq!(d.period(), Some(Period::Autumn));
    }

    #[test]
    fn test_parse_negative_and_extended_years() {
        assert_eq!(parse_strict("-0044-03-15").unwrap().year(), Some("-0044"));
        assert_eq!(parse_strict("y12345").unwrap().year(), Some("y12345"));
        assert_eq!(parse_strict("19uu~").unwrap().year(), Some("19uu"));
    }

    #[test]
    fn test_parse_open_and_unknown() {
        let open = parse_strict("open").unwrap();
        assert!(open.is_open());
        assert_eq!(open.year(), None);
        assert_eq!(open.to_string(), "open");

        let unknown = parse_strict("unknown").unwrap();
        assert!(unknown.is_unknown());
        assert_eq!(unknown.to_string(), "unknown");
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["2004-13", "2004-02-30", "1977-23-15", "", "ca. 1887", "2004/2005"] {
            let result = parse_strict(input);
            assert!(
                matches!(result, Err(EdtfError::InvalidGrammar(_))),
                "{input:?} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_display_orders_markers() {
        assert_eq!(parse_strict("2004~?").unwrap().to_string(), "2004?~");
        assert_eq!(parse_strict("2004-uu-uu").unwrap().to_string(), "2004-uu-uu");
        assert_eq!(date("1999", Some("12"), Some("25")).to_canonical_string(), "1999-12-25");
    }

    #[test]
    fn test_new_rejects_broken_invariants() {
        assert!(matches!(
            EdtfDate::new("2004", Some("123"), None, false, false),
            Err(EdtfError::InvalidMonth(_))
        ));
        assert!(matches!(
            EdtfDate::new("2004", Some("13"), None, false, false),
            Err(EdtfError::InvalidMonth(_))
        ));
        assert!(matches!(
            EdtfDate::new("2004", None, Some("01"), false, false),
            Err(EdtfError::DayWithoutMonth(_))
        ));
        assert!(matches!(
            EdtfDate::new("2004", Some("22"), Some("01"), false, false),
            Err(EdtfError::DayWithSeason(_))
        ));
        assert!(matches!(
            EdtfDate::new("2004", Some("06"), Some("99"), false, false),
            Err(EdtfError::InvalidDay(_))
        ));
        assert!(matches!(
            EdtfDate::new("2003", Some("02"), Some("29"), false, false),
            Err(EdtfError::NoSuchDate(_))
        ));
        assert!(matches!(
            EdtfDate::new("2004", Some("04"), Some("31"), false, false),
            Err(EdtfError::NoSuchDate(_))
        ));
        assert!(matches!(
            EdtfDate::new("abcd", None, None, false, false),
            Err(EdtfError::InvalidYear(_))
        ));
        assert!(matches!(
            EdtfDate::new("2004?", None, None, false, false),
            Err(EdtfError::InvalidYear(_))
        ));
    }

    #[test]
    fn test_new_checks_calendar_only_for_known_dates() {
        let err = EdtfDate::new("2003", Some("02"), Some("30"), false, false).unwrap_err();
        assert_eq!(err.to_string(), r#"No such calendar date: "2003-02-30""#);

        assert!(EdtfDate::new("2004", Some("02"), Some("29"), false, false).is_ok());
        assert!(EdtfDate::new("2003", Some("02"), Some("uu"), false, false).is_ok());
        assert!(EdtfDate::new("y300000", Some("02"), Some("30"), false, false).is_ok());
    }

    #[test]
    fn test_to_naive_date() {
        assert_eq!(date("2004", None, None).to_naive_date(), Some(naive(2004, 1, 1)));
        assert_eq!(date("2004", Some("uu"), None).to_naive_date(), Some(naive(2004, 1, 1)));
        assert_eq!(date("2004", Some("06"), None).to_naive_date(), Some(naive(2004, 6, 1)));
        assert_eq!(date("2004", Some("06"), Some("uu")).to_naive_date(), Some(naive(2004, 6, 1)));
        assert_eq!(date("2004", Some("06"), Some("11")).to_naive_date(), Some(naive(2004, 6, 11)));
        assert_eq!(date("-0044", Some("03"), Some("15")).to_naive_date(), Some(naive(-44, 3, 15)));
        assert_eq!(date("0012", None, None).to_naive_date(), Some(naive(12, 1, 1)));
    }

    #[test]
    fn test_to_naive_date_seasons() {
        assert_eq!(date("1977", Some("21"), None).to_naive_date(), Some(naive(1977, 3, 22)));
        assert_eq!(date("1977", Some("22"), None).to_naive_date(), Some(naive(1977, 6, 22)));
        assert_eq!(date("1977", Some("23"), None).to_naive_date(), Some(naive(1977, 9, 22)));
        assert_eq!(date("1977", Some("24"), None).to_naive_date(), Some(naive(1977, 12, 22)));
    }

    #[test]
    fn test_to_naive_date_unrepresentable() {
        assert_eq!(EdtfDate::open().to_naive_date(), None);
        assert_eq!(EdtfDate::unknown().to_naive_date(), None);
        assert_eq!(date("19uu", None, None).to_naive_date(), None);
        assert_eq!(date("199u", None, None).to_naive_date(), None);
        assert_eq!(date("y300000", None, None).to_naive_date(), None);
        // Inside the checked range but past chrono's limit
        assert_eq!(date("y270000", None, None).to_naive_date(), None);
    }

    #[test]
    fn test_to_timestamp() {
        let ts = date("1970", Some("01"), Some("02")).to_timestamp().unwrap();
        assert_eq!(ts.timestamp(), 86_400);
        assert_eq!(EdtfDate::open().to_timestamp(), None);
    }

    #[test]
    fn test_serde_string_format() {
        let d = parse_strict("2004-06?").unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""2004-06?""#);

        let parsed: EdtfDate = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn test_serde_validation() {
        let result: Result<EdtfDate, _> = serde_json::from_str(r#""2004-13""#);
        assert!(result.is_err());

        let result: Result<EdtfDate, _> = serde_json::from_str(r#""open""#);
        assert!(result.unwrap().is_open());
    }
}
