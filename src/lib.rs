//! Validation, decomposition and extraction of EDTF dates.
//!
//! Strict EDTF text (`2004-06~`, `19uu`, `1977-23`, `2004/open`) is checked
//! with [`validate`] and decomposed with [`parse_strict`]. Loosely written
//! dates (`ca. 1887`, `Summer 1923`, `12/25/1999`) go through [`extract`].
//! Both produce an [`EdtfDate`], which renders back to canonical EDTF text
//! and can be pinned to a calendar day.

mod calendar;
mod classify;
mod consts;
mod date;
mod extract;
mod interval;
mod markers;
mod prelude;
mod types;
mod validate;

pub use calendar::{date_exists, days_in_month, is_leap_year, year_value};
pub use classify::{Classified, Pattern, TokenGroups, TokenKind, classify};
pub use consts::*;
pub use date::{EdtfDate, parse_strict};
pub use extract::{Extractor, extract};
pub use interval::EdtfInterval;
pub use markers::{Qualifiers, scope_markers};
pub use types::Period;
pub use validate::{validate, validate_single};

/// Errors from building or strictly parsing EDTF values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EdtfError {
    /// Text does not match any recognized EDTF shape.
    #[error("Invalid EDTF date: {0:?}")]
    InvalidGrammar(String),

    #[error("Invalid year: {0:?}")]
    InvalidYear(String),

    /// Month is not `01`-`12`, `21`-`24` or `uu`.
    #[error("Invalid month: {0:?} (must be 01-12, 21-24 or uu)")]
    InvalidMonth(String),

    /// Day is not `01`-`31` or `uu`.
    #[error("Invalid day: {0:?} (must be 01-31 or uu)")]
    InvalidDay(String),

    #[error("Cannot have day {0:?} without month")]
    DayWithoutMonth(String),

    #[error("Season {0:?} cannot have a day")]
    DayWithSeason(String),

    #[error("No such calendar date: {0:?}")]
    NoSuchDate(String),

    /// Interval text is not two non-empty endpoints.
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_examples() {
        assert!(validate("2004"));
        assert!(!validate("2004-13"));
        assert!(!validate("2004-02-30"));
        assert!(validate("2004-02-29"));
        assert!(!validate("2003-02-29"));
        assert!(validate("2004/open"));
        assert!(validate("unknown/2004"));
        assert!(!validate("open/2004"));
        assert!(!validate("2004/2005/2006"));
        assert!(!validate("1977-23-15"));
    }

    #[test]
    fn test_strict_and_extracted_agree() {
        for input in ["2004", "2004-06", "2004-06-11", "1977-23", "19uu", "2004-06-11?~"] {
            assert_eq!(extract(input), parse_strict(input).ok(), "input {input:?}");
        }
    }

    #[test]
    fn test_scope_markers_exported() {
        let scoped = scope_markers("2004-06?-11");
        assert_eq!(scoped.len(), 3);
        assert!(scoped[0].uncertain && scoped[1].uncertain && !scoped[2].uncertain);
    }

    #[test]
    fn test_error_messages() {
        let err = parse_strict("2004-13").unwrap_err();
        assert_eq!(err.to_string(), r#"Invalid EDTF date: "2004-13""#);
        assert_eq!(EdtfError::InvalidMonth("13".into()).to_string(), r#"Invalid month: "13" (must be 01-12, 21-24 or uu)"#);
    }

    #[test]
    fn test_public_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EdtfDate>();
        assert_send_sync::<EdtfInterval>();
        assert_send_sync::<TokenGroups>();
        assert_send_sync::<Extractor<'static>>();
    }
}
