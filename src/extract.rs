//! Best-effort extraction of a date from free text such as `ca. 1887`,
//! `Summer 1923` or `12/25/1999`.
//!
//! Fields are resolved in a fixed order (year, uncertainty, approximation,
//! month, day) from a token list. Each step consumes the token it used; once
//! no tokens remain the later fields stay unset. Anything left over at the
//! end makes the whole extraction fail.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::calendar::text_date_exists;
use crate::classify::{Pattern, TokenGroups, classify};
use crate::consts::{APPROXIMATE_MARKER, FIRST_SEASON, JANUARY, LAST_SEASON, MAX_DAY, MAX_MONTH, MIN_DAY, UNCERTAIN_MARKER};
use crate::date::{EdtfDate, parse_strict};
use crate::prelude::*;
use crate::types::Period;
use crate::validate::validate_single;

/// Characters outside this set are dropped before tokenizing.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_ /\-~?]").expect("valid regex"));

/// Why free text could not be read as a date.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
enum Rejection {
    #[display(fmt = "no year found")]
    NoYear,
    #[display(fmt = "no month found")]
    NoMonth,
    #[display(fmt = "month {_0} is not a calendar month or season")]
    BadMonth(String),
    #[display(fmt = "a season cannot carry a day")]
    SeasonWithDay,
    #[display(fmt = "no single day between 1 and 31 found")]
    NoDay,
    #[display(fmt = "leftover token {_0:?}")]
    Leftover(String),
    #[display(fmt = "{year}-{month}-{day} is not a calendar date")]
    NoSuchDate { year: String, month: String, day: String },
    #[display(fmt = "{_0}")]
    Invalid(crate::EdtfError),
}

/// Where the extractor stands while resolving fields.
struct Cursor {
    tokens:   Vec<String>,
    consumed: Vec<bool>,
}

impl Cursor {
    fn new(text: &str) -> Self {
        let tokens = tokenize(text);
        let consumed = vec![false; tokens.len()];
        Self { tokens, consumed }
    }

    /// Tokens not yet consumed, with their positions in the full list.
    fn remaining(&self) -> Vec<(usize, &str)> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.consumed[*idx])
            .map(|(idx, token)| (idx, token.as_str()))
            .collect()
    }

    fn is_exhausted(&self) -> bool {
        self.consumed.iter().all(|c| *c)
    }

    /// Finds the first remaining token matching `group`, consumes it and
    /// returns its position and tag.
    fn take<T: Copy>(&mut self, group: &[Pattern<T>]) -> Option<(usize, T)> {
        let remaining = self.remaining();
        let texts: Vec<&str> = remaining.iter().map(|(_, token)| *token).collect();
        let found = classify(&texts, group)?;
        let position = remaining[found.position].0;
        let tag = found.tag;
        self.consumed[position] = true;
        Some((position, tag))
    }

    /// Remaining tokens made only of ASCII digits.
    fn numeric(&self) -> Vec<(usize, &str)> {
        self.remaining().into_iter().filter(|(_, t)| is_numeric(t)).collect()
    }

    fn consume(&mut self, position: usize) {
        self.consumed[position] = true;
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Splits free text into tokens: disallowed characters are dropped, `/`
/// and `-` separate tokens, and `?`/`~` always stand alone.
fn tokenize(text: &str) -> Vec<String> {
    let cleaned = DISALLOWED.replace_all(text, "");
    let mut spaced = String::with_capacity(cleaned.len() * 2);
    for c in cleaned.chars() {
        match c {
            '/' | '-' => spaced.push(' '),
            UNCERTAIN_MARKER | APPROXIMATE_MARKER => {
                spaced.push(' ');
                spaced.push(c);
                spaced.push(' ');
            },
            _ => spaced.push(c),
        }
    }
    spaced.split_whitespace().map(str::to_owned).collect()
}

/// Parses a numeric month token, accepting calendar months and season codes.
fn numeric_month(token: &str) -> Result<String, Rejection> {
    let bad = || Rejection::BadMonth(token.to_owned());
    let value = token.parse::<u32>().map_err(|_| bad())?;
    let in_range = (u32::from(JANUARY)..=u32::from(MAX_MONTH)).contains(&value)
        || (u32::from(FIRST_SEASON)..=u32::from(LAST_SEASON)).contains(&value);
    if in_range { Ok(format!("{value:02}")) } else { Err(bad()) }
}

/// Reads dates out of free text using a set of pattern tables.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'g> {
    groups: &'g TokenGroups,
}

impl Default for Extractor<'static> {
    fn default() -> Self {
        Self::new(TokenGroups::english())
    }
}

impl<'g> Extractor<'g> {
    pub const fn new(groups: &'g TokenGroups) -> Self {
        Self { groups }
    }

    /// Extracts a date from `text`, or `None` if any part of it cannot be
    /// confidently read.
    ///
    /// Text that is already a valid single EDTF date is decomposed directly.
    pub fn extract(&self, text: &str) -> Option<EdtfDate> {
        if validate_single(text) {
            trace!(text, "accepted as strict EDTF");
            return parse_strict(text).ok();
        }

        match self.resolve(text) {
            Ok(date) => Some(date),
            Err(reason) => {
                debug!(text, %reason, "could not extract a date");
                None
            },
        }
    }

    fn resolve(&self, text: &str) -> Result<EdtfDate, Rejection> {
        let mut cursor = Cursor::new(text);
        // The month-first rule looks at numeric tokens before anything is consumed
        let all_numeric: Vec<usize> = cursor.numeric().into_iter().map(|(idx, _)| idx).collect();

        let (year_at, ()) = cursor.take(&self.groups.year).ok_or(Rejection::NoYear)?;
        let year = cursor.tokens[year_at].clone();

        let mut uncertain = false;
        let mut approximate = false;
        let mut month = None;
        let mut day = None;

        if !cursor.is_exhausted() {
            uncertain = cursor.take(&self.groups.uncertain).is_some();
        }
        if !cursor.is_exhausted() {
            approximate = cursor.take(&self.groups.approximate).is_some();
        }
        if !cursor.is_exhausted() {
            let month_first = all_numeric.iter().position(|idx| *idx == year_at) == Some(2);
            month = Some(self.resolve_month(&mut cursor, month_first)?);
        }
        if !cursor.is_exhausted() {
            if month.as_ref().is_some_and(|(_, season)| *season) {
                return Err(Rejection::SeasonWithDay);
            }
            day = Some(Self::resolve_day(&mut cursor)?);
        }
        if let Some((_, leftover)) = cursor.remaining().first() {
            if let Some(kind) = self.groups.kind_of(leftover) {
                debug!(token = leftover, %kind, "unused token has a known meaning");
            }
            return Err(Rejection::Leftover((*leftover).to_owned()));
        }

        let month = month.map(|(m, _)| m);
        if let (Some(m), Some(d)) = (&month, &day) {
            if !text_date_exists(&year, m, d) {
                return Err(Rejection::NoSuchDate {
                    year,
                    month: m.clone(),
                    day: d.clone(),
                });
            }
        }

        EdtfDate::new(&year, month.as_deref(), day.as_deref(), uncertain, approximate)
            .map_err(Rejection::Invalid)
    }

    /// Resolves the month slot, returning its two-digit text and whether it
    /// is a season.
    ///
    /// With two numeric tokens left, the year's position among the original
    /// numeric tokens decides: third means month-first (`12/25/1999`),
    /// anything else takes the second token. A lone numeric token alongside
    /// other words is taken as the day, so the month must come from a name.
    fn resolve_month(&self, cursor: &mut Cursor, month_first: bool) -> Result<(String, bool), Rejection> {
        let numeric = cursor.numeric();
        let total = cursor.remaining().len();

        match (numeric.len(), total) {
            (2, _) => {
                let (position, token) = numeric[usize::from(!month_first)];
                let month = numeric_month(token)?;
                cursor.consume(position);
                let season = month.parse::<u8>().is_ok_and(|code| code >= FIRST_SEASON);
                Ok((month, season))
            },
            (1, 1) => {
                let (position, token) = numeric[0];
                let month = numeric_month(token)?;
                cursor.consume(position);
                let season = month.parse::<u8>().is_ok_and(|code| code >= FIRST_SEASON);
                Ok((month, season))
            },
            (0, _) | (1, _) => {
                let (_, period): (usize, Period) = cursor
                    .take(&self.groups.months)
                    .or_else(|| cursor.take(&self.groups.seasons))
                    .ok_or(Rejection::NoMonth)?;
                Ok((period.padded(), period.is_season()))
            },
            _ => Err(Rejection::NoMonth),
        }
    }

    fn resolve_day(cursor: &mut Cursor) -> Result<String, Rejection> {
        let numeric = cursor.numeric();
        let [(position, token)] = numeric.as_slice() else {
            return Err(Rejection::NoDay);
        };
        let position = *position;
        let value = token.parse::<u32>().map_err(|_| Rejection::NoDay)?;
        if !(u32::from(MIN_DAY)..=u32::from(MAX_DAY)).contains(&value) {
            return Err(Rejection::NoDay);
        }
        cursor.consume(position);
        Ok(format!("{value:02}"))
    }
}

/// Extracts a date from free text with the built-in English tables.
pub fn extract(text: &str) -> Option<EdtfDate> {
    Extractor::default().extract(text)
}
