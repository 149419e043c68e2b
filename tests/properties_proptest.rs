//! Property-based tests for the EDTF grammar
//!
//! These tests check that everything the validator accepts survives a
//! parse/render round trip, that rendering is idempotent, and that the
//! calendar check gives up outside its checked year range.

use edtf_date::{
    EdtfInterval, MAX_CHECKED_YEAR, MIN_CHECKED_YEAR, date_exists, extract, parse_strict, validate,
    validate_single,
};
use proptest::prelude::*;

/// Generate year text: plain, signed, partly unspecified and extended
fn year_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,4}",
        "-[0-9]{1,4}",
        "[0-9]{2}uu",
        "[0-9]{3}u",
        "y[1-9][0-9]{4,6}",
    ]
}

/// Generate month text, including out-of-range values
fn month_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{2}", Just("uu".to_owned()), "2[0-5]"]
}

/// Generate day text, including out-of-range values
fn day_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[0-3][0-9]", Just("uu".to_owned())]
}

/// Generate trailing marker runs, including repeated markers
fn markers_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop_oneof![Just(""), Just("?"), Just("~"), Just("?~"), Just("~?")].prop_map(str::to_owned),
        1 => "[?~]{2,4}",
    ]
}

/// Generate candidate single dates, valid or not
fn date_strategy() -> impl Strategy<Value = String> {
    (
        year_strategy(),
        prop::option::of(month_strategy()),
        prop::option::of(day_strategy()),
        markers_strategy(),
    )
        .prop_map(|(year, month, day, markers)| {
            let mut text = year;
            if let Some(month) = month {
                text.push('-');
                text.push_str(&month);
                if let Some(day) = day {
                    text.push('-');
                    text.push_str(&day);
                }
            }
            text.push_str(&markers);
            text
        })
}

fn endpoint_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => date_strategy(),
        1 => Just("open".to_owned()),
        1 => Just("unknown".to_owned()),
    ]
}

/// Puts `?` before `~` in a trailing marker run.
fn normalized(text: &str) -> String {
    text.replace("~?", "?~")
}

proptest! {
    #[test]
    fn accepted_dates_round_trip(text in date_strategy()) {
        if validate(&text) {
            let parsed = parse_strict(&text).expect("validated text must parse");
            prop_assert_eq!(parsed.to_string(), normalized(&text));
        } else {
            prop_assert!(parse_strict(&text).is_err());
        }
    }

    #[test]
    fn accepted_intervals_round_trip(start in endpoint_strategy(), end in endpoint_strategy()) {
        let text = format!("{start}/{end}");
        if validate(&text) {
            let parsed: EdtfInterval = text.parse().expect("validated interval must parse");
            prop_assert_eq!(parsed.to_string(), normalized(&text));
        } else {
            prop_assert!(text.parse::<EdtfInterval>().is_err());
        }
    }

    #[test]
    fn canonical_text_is_idempotent(text in date_strategy()) {
        if let Ok(parsed) = parse_strict(&text) {
            let once = parsed.to_canonical_string();
            let twice = parse_strict(&once).expect("canonical text must parse").to_canonical_string();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn extraction_of_strict_text_matches_parse(text in date_strategy()) {
        if validate_single(&text) {
            prop_assert_eq!(extract(&text), parse_strict(&text).ok());
        }
    }

    #[test]
    fn repeated_markers_are_rejected(text in date_strategy(), repeated in prop_oneof![Just("??"), Just("~~")]) {
        let doubled = format!("{text}{repeated}");
        prop_assert!(!validate(&doubled));
        prop_assert!(parse_strict(&doubled).is_err());
    }

    #[test]
    fn far_years_always_exist(
        offset in 1i64..1_000_000_000,
        month in any::<u8>(),
        day in any::<u8>(),
    ) {
        prop_assert!(date_exists(MAX_CHECKED_YEAR + offset, month, day));
        prop_assert!(date_exists(MIN_CHECKED_YEAR - offset, month, day));
    }

    #[test]
    fn extraction_never_panics(text in "\\PC{0,40}") {
        let _ = extract(&text);
        let _ = validate(&text);
    }
}
