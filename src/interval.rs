use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{INTERVAL_SEPARATOR, OPEN, UNKNOWN};
use crate::date::{EdtfDate, parse_strict};
use crate::prelude::*;
use crate::validate::validate_single;
use crate::EdtfError;

/// An EDTF interval between two dates.
/// The start may be `unknown`; the end may be `open` or `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct EdtfInterval {
    start: EdtfDate,
    end:   EdtfDate,
}

impl EdtfInterval {
    /// Creates an interval from two endpoints.
    ///
    /// # Errors
    /// Returns `EdtfError::InvalidInterval` if `start` is open.
    pub fn new(start: EdtfDate, end: EdtfDate) -> Result<Self, EdtfError> {
        if start.is_open() {
            return Err(EdtfError::InvalidInterval(format!("start cannot be {OPEN}")));
        }
        Ok(Self { start, end })
    }

    /// Returns the start date of the interval
    pub const fn start(&self) -> &EdtfDate {
        &self.start
    }

    /// Returns the end date of the interval
    pub const fn end(&self) -> &EdtfDate {
        &self.end
    }

    /// Returns both endpoints as a tuple
    pub const fn dates(&self) -> (&EdtfDate, &EdtfDate) {
        (&self.start, &self.end)
    }

    /// True when the interval has no asserted end.
    pub const fn is_ongoing(&self) -> bool {
        self.end.is_open()
    }

    fn parse_endpoint(text: &str, allow_open: bool) -> Result<EdtfDate, EdtfError> {
        let literal = text == UNKNOWN || (allow_open && text == OPEN);
        if literal || validate_single(text) {
            parse_strict(text)
        } else {
            Err(EdtfError::InvalidGrammar(text.to_owned()))
        }
    }
}

impl FromStr for EdtfInterval {
    type Err = EdtfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let separator_count = s.matches(INTERVAL_SEPARATOR).count();

        match separator_count {
            0 => Err(EdtfError::InvalidInterval(format!(
                "No interval separator found (expected '{INTERVAL_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start, end) = s.split_once(INTERVAL_SEPARATOR).ok_or_else(|| {
                    EdtfError::InvalidInterval(format!("Separator '{INTERVAL_SEPARATOR}' not found: {s}"))
                })?;
                if start.is_empty() || end.is_empty() {
                    return Err(EdtfError::InvalidInterval(format!("Empty endpoint: {s}")));
                }

                let start = Self::parse_endpoint(start, false)?;
                let end = Self::parse_endpoint(end, true)?;

                Self::new(start, end)
            },
            _ => Err(EdtfError::InvalidInterval(format!(
                "Too many '{INTERVAL_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for EdtfInterval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EdtfInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
