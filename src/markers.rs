//! Attribution of `?` and `~` markers to the components they qualify.
//!
//! A marker must directly follow a bracket, and then qualifies every
//! component from the start of the date through that bracket. Brackets come
//! from explicit parentheses, or are implied around the run of components
//! and separators that a marker directly follows, e.g. `2004-06?-11` reads
//! as `(2004-06)?-11` and `2004?-06~` as `(2004)?-(06)~`, which leaves the
//! year both uncertain and approximate.

use serde::{Deserialize, Serialize};

use crate::consts::{APPROXIMATE_MARKER, DATE_SEPARATOR, EXTENDED_YEAR_PREFIX, UNCERTAIN_MARKER};

/// Qualifiers attached to one year, month or day component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qualifiers {
    pub uncertain:   bool,
    pub approximate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Uncertain,
    Approximate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Component(usize),
    Separator,
    Open,
    Close,
    Marker(Marker),
    Other,
}

impl Piece {
    const fn is_run(self) -> bool {
        matches!(self, Self::Component(_) | Self::Separator)
    }
}

/// Splits `date` into pieces, numbering components from zero. A run of
/// digits and `u` (with an optional `y` prefix) is one component.
fn lex(date: &str) -> (Vec<Piece>, usize) {
    let mut pieces = Vec::new();
    let mut components = 0;
    let mut in_component = false;

    for c in date.chars() {
        let piece = match c {
            '0'..='9' | 'u' | EXTENDED_YEAR_PREFIX => {
                if !in_component {
                    pieces.push(Piece::Component(components));
                    components += 1;
                    in_component = true;
                }
                continue;
            },
            DATE_SEPARATOR => Piece::Separator,
            '(' => Piece::Open,
            ')' => Piece::Close,
            UNCERTAIN_MARKER => Piece::Marker(Marker::Uncertain),
            APPROXIMATE_MARKER => Piece::Marker(Marker::Approximate),
            _ => Piece::Other,
        };
        in_component = false;
        pieces.push(piece);
    }

    (pieces, components)
}

/// Wraps each run of components and separators that is directly followed by
/// a marker in an implied bracket. A run that starts the string is wrapped
/// whole; any other run is wrapped from just after its first separator.
fn bracket_runs(pieces: &[Piece]) -> Vec<Piece> {
    let mut out = Vec::with_capacity(pieces.len() + 4);
    let mut i = 0;

    while i < pieces.len() {
        if !pieces[i].is_run() {
            out.push(pieces[i]);
            i += 1;
            continue;
        }

        let start = i;
        let mut end = i;
        while end < pieces.len() && pieces[end].is_run() {
            end += 1;
        }
        let run = &pieces[start..end];
        let marked = matches!(pieces.get(end), Some(Piece::Marker(_)));
        let wrap_from = if start == 0 {
            Some(0)
        } else {
            run.iter().position(|p| *p == Piece::Separator).map(|sep| sep + 1)
        };

        match wrap_from {
            Some(offset) if marked => {
                out.extend_from_slice(&run[..offset]);
                out.push(Piece::Open);
                out.extend_from_slice(&run[offset..]);
                out.push(Piece::Close);
            },
            _ => out.extend_from_slice(run),
        }
        i = end;
    }

    out
}

/// Rewrites every `~?` pair as `?~`.
fn normalize_order(pieces: &mut [Piece]) {
    let mut i = 0;
    while i + 1 < pieces.len() {
        if pieces[i] == Piece::Marker(Marker::Approximate) && pieces[i + 1] == Piece::Marker(Marker::Uncertain) {
            pieces.swap(i, i + 1);
            i += 2;
        } else {
            i += 1;
        }
    }
}

/// Components from the start of the date through the `)` at `close`.
fn qualified_through(pieces: &[Piece], close: usize) -> impl Iterator<Item = usize> + '_ {
    pieces[..close].iter().filter_map(|piece| match piece {
        Piece::Component(idx) => Some(*idx),
        _ => None,
    })
}

/// Determines which year/month/day components each `?` and `~` in `date`
/// applies to.
///
/// Returns one entry per component, in order. All `?` markers are scoped
/// first, then all `~` markers, each left to right; a marker is removed
/// once scoped so that the next one of the same kind sees the bracket
/// before it. A scoped marker reaches every component to its left, so
/// `2004?-06-11~` leaves the year uncertain and approximate. A marker that
/// does not directly follow a bracket qualifies nothing.
pub fn scope_markers(date: &str) -> Vec<Qualifiers> {
    let (pieces, count) = lex(date);
    let mut pieces = bracket_runs(&pieces);
    normalize_order(&mut pieces);

    let mut results = vec![Qualifiers::default(); count];

    for marker in [Marker::Uncertain, Marker::Approximate] {
        while let Some(at) = pieces.iter().position(|p| *p == Piece::Marker(marker)) {
            if at > 0 && pieces[at - 1] == Piece::Close {
                for idx in qualified_through(&pieces, at - 1) {
                    let entry = &mut results[idx];
                    match marker {
                        Marker::Uncertain => entry.uncertain = true,
                        Marker::Approximate => entry.approximate = true,
                    }
                }
            }
            pieces.remove(at);
        }
    }

    results
}
