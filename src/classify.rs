//! Token classification against ordered pattern groups.
//!
//! A group is an ordered list of regexes, each tagged with the value it
//! stands for. Matching scans tokens in order and, for each token, patterns
//! in group order, so the earliest token wins and ties go to the
//! lowest-ranked pattern.

use std::sync::LazyLock;

use regex::Regex;

use crate::prelude::*;
use crate::types::Period;

/// A recognition pattern and the value it stands for.
#[derive(Debug, Clone)]
pub struct Pattern<T> {
    tag:   T,
    regex: Regex,
}

impl<T> Pattern<T> {
    /// Compiles `pattern` into a recognition pattern tagged with `tag`.
    ///
    /// # Errors
    /// Returns the regex compilation error if `pattern` is malformed.
    pub fn new(tag: T, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            tag,
            regex: Regex::new(pattern)?,
        })
    }

    pub const fn tag(&self) -> &T {
        &self.tag
    }

    pub fn is_match(&self, token: &str) -> bool {
        self.regex.is_match(token)
    }
}

/// Outcome of a successful classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'t, T> {
    /// The matched token text
    pub token:    &'t str,
    /// Position of the token in the scanned list
    pub position: usize,
    /// Rank of the matching pattern within its group
    pub rank:     usize,
    /// Tag of the matching pattern
    pub tag:      T,
}

/// Finds the first token matching any pattern of `group`.
pub fn classify<'t, S, T>(tokens: &'t [S], group: &[Pattern<T>]) -> Option<Classified<'t, T>>
where
    S: AsRef<str>,
    T: Copy,
{
    tokens.iter().enumerate().find_map(|(position, token)| {
        let token = token.as_ref();
        group
            .iter()
            .enumerate()
            .find(|(_, pattern)| pattern.is_match(token))
            .map(|(rank, pattern)| Classified {
                token,
                position,
                rank,
                tag: pattern.tag,
            })
    })
}

/// Which group a single token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month name ({_0})")]
    Month(Period),
    #[display(fmt = "season ({_0})")]
    Season(Period),
    #[display(fmt = "uncertainty marker")]
    Uncertain,
    #[display(fmt = "approximation marker")]
    Approximate,
    #[display(fmt = "interval indicator")]
    Indicator,
}

/// The immutable pattern tables used by free-text extraction.
#[derive(Debug, Clone)]
pub struct TokenGroups {
    pub approximate: Vec<Pattern<()>>,
    pub uncertain:   Vec<Pattern<()>>,
    pub indicators:  Vec<Pattern<()>>,
    pub year:        Vec<Pattern<()>>,
    pub months:      Vec<Pattern<Period>>,
    pub seasons:     Vec<Pattern<Period>>,
}

static ENGLISH: LazyLock<TokenGroups> = LazyLock::new(|| {
    TokenGroups::try_english().expect("built-in token patterns are valid regexes")
});

impl TokenGroups {
    /// The built-in English tables, compiled once per process.
    pub fn english() -> &'static Self {
        &ENGLISH
    }

    fn try_english() -> Result<Self, regex::Error> {
        let plain = |patterns: &[&str]| -> Result<Vec<Pattern<()>>, regex::Error> {
            patterns.iter().map(|p| Pattern::new((), p)).collect()
        };
        let tagged = |patterns: &[(Period, &str)]| -> Result<Vec<Pattern<Period>>, regex::Error> {
            patterns.iter().map(|&(tag, p)| Pattern::new(tag, p)).collect()
        };

        Ok(Self {
            approximate: plain(&[
                r"(?i)^c(?:irc)?a?$",
                r"(?i)^about$",
                r"(?i)^around$",
                r"(?i)^roughly$",
                r"^~$",
            ])?,
            uncertain:   plain(&[r"^\?$"])?,
            indicators:  plain(&[r"(?i)^in$", r"(?i)^on$", r"(?i)^from$", r"(?i)^to$"])?,
            // Four-digit years starting with 1 or 2 only
            year:        plain(&[r"^[12][0-9]{3}$"])?,
            months:      tagged(&[
                (Period::January, r"(?i)^jan(?:uary)?$"),
                (Period::February, r"(?i)^feb(?:ruary)?$"),
                (Period::March, r"(?i)^mar(?:ch)?$"),
                (Period::April, r"(?i)^apr(?:il)?$"),
                (Period::May, r"(?i)^may$"),
                (Period::June, r"(?i)^june?$"),
                (Period::July, r"(?i)^july?$"),
                (Period::August, r"(?i)^aug(?:ust)?$"),
                (Period::September, r"(?i)^sep(?:t|tember)?$"),
                (Period::October, r"(?i)^oct(?:ober)?$"),
                (Period::November, r"(?i)^nov(?:ember)?$"),
                (Period::December, r"(?i)^dec(?:ember)?$"),
            ])?,
            seasons:     tagged(&[
                (Period::Spring, r"(?i)^spr(?:ing)?$"),
                (Period::Summer, r"(?i)^sum(?:mer)?$"),
                (Period::Autumn, r"(?i)^(?:aut|autumn|fall)$"),
                (Period::Winter, r"(?i)^win(?:ter)?$"),
            ])?,
        })
    }

    /// Reports which group a single token belongs to, checking groups in
    /// the order year, uncertain, approximate, month, season, indicator.
    pub fn kind_of(&self, token: &str) -> Option<TokenKind> {
        let tokens = [token];
        if classify(&tokens, &self.year).is_some() {
            return Some(TokenKind::Year);
        }
        if classify(&tokens, &self.uncertain).is_some() {
            return Some(TokenKind::Uncertain);
        }
        if classify(&tokens, &self.approximate).is_some() {
            return Some(TokenKind::Approximate);
        }
        if let Some(found) = classify(&tokens, &self.months) {
            return Some(TokenKind::Month(found.tag));
        }
        if let Some(found) = classify(&tokens, &self.seasons) {
            return Some(TokenKind::Season(found.tag));
        }
        classify(&tokens, &self.indicators).map(|_| TokenKind::Indicator)
    }
}
