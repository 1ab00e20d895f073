//! English locale
//!
//!     Numbers go through the generic scanner with the English vocabulary;
//!     both scale systems are supported, with the short scale the default.
//!     Durations read digit + unit pairs after spoken numbers have been
//!     substituted, so "five and a half minutes" works the same as "5.5
//!     minutes". Calendar units use day equivalents: a month is 30.42 days
//!     and a year 365.242 days.

use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::duration::DurationRules;
use crate::error::DateTimeError;
use crate::scan::{self, NumberOptions};

pub mod datetime;
pub mod lexicon;

use lexicon::LEXICON;

pub fn extract_number(text: &str, options: NumberOptions) -> Option<f64> {
    scan::extract_number(text, &LEXICON, options)
}

pub fn extract_numbers(text: &str, options: NumberOptions) -> Vec<f64> {
    scan::extract_numbers(text, &LEXICON, options)
}

pub fn is_fractional(word: &str, short_scale: bool) -> Option<f64> {
    use crate::lexicon::NumberLexicon;
    let word = word.to_lowercase();
    LEXICON.fraction(&word, &word, short_scale)
}

pub fn is_ordinal(word: &str) -> Option<f64> {
    use crate::lexicon::NumberLexicon;
    LEXICON.ordinal(&word.to_lowercase(), true)
}

const DAY_SECONDS: f64 = 86400.0;
const YEAR_DAYS: f64 = 365.242;

static DURATION: Lazy<DurationRules> = Lazy::new(|| {
    let unit = |pattern: &str, seconds: f64| {
        (
            Regex::new(&format!(
                r"(?:^|\s)(?P<value>\d+(?:\.?\d+)?)(?:\s+|-){}\b",
                pattern
            ))
            .unwrap(),
            seconds,
        )
    };
    DurationRules {
        units: vec![
            unit("microseconds?", 1e-6),
            unit("milliseconds?", 1e-3),
            unit("seconds?", 1.0),
            unit("minutes?", 60.0),
            unit("hours?", 3600.0),
            unit("days?", DAY_SECONDS),
            unit("weeks?", 7.0 * DAY_SECONDS),
            unit("months?", 30.42 * DAY_SECONDS),
            unit("years?", YEAR_DAYS * DAY_SECONDS),
            unit("decades?", 10.0 * YEAR_DAYS * DAY_SECONDS),
            unit("centur(?:y|ies)", 100.0 * YEAR_DAYS * DAY_SECONDS),
            unit("millenni(?:um|a)s?", 1000.0 * YEAR_DAYS * DAY_SECONDS),
        ],
        strip_digit_tokens: false,
    }
});

/// Sum of the duration phrases of the utterance, with the leftover text.
pub fn extract_duration(text: &str) -> (Option<Duration>, String) {
    if text.is_empty() {
        return (None, String::new());
    }
    let converted = scan::convert_words_to_numbers(text, &LEXICON, true, false);
    DURATION.extract(&converted)
}

pub fn extract_datetime<Tz: TimeZone>(
    text: &str,
    anchor: &DateTime<Tz>,
    default_time: Option<NaiveTime>,
) -> Result<Option<(DateTime<Tz>, String)>, DateTimeError> {
    datetime::extract_datetime(text, anchor, default_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_number_basics() {
        let options = NumberOptions::default();
        assert_eq!(extract_number("this is two beers", options), Some(2.0));
        assert_eq!(
            extract_number("two hundred and fifty thousand ants", options),
            Some(250_000.0)
        );
        assert_eq!(extract_number("minus twenty degrees", options), Some(-20.0));
        assert_eq!(extract_number("two and three quarters cups", options), Some(2.75));
        assert_eq!(extract_number("no numbers here", options), None);
    }

    #[test]
    fn test_extract_number_scales() {
        assert_eq!(
            extract_number("two billion", NumberOptions::default()),
            Some(2e9)
        );
        let long = NumberOptions {
            short_scale: false,
            ..NumberOptions::default()
        };
        assert_eq!(extract_number("two billion", long), Some(2e12));
    }

    #[test]
    fn test_extract_numbers_splits_adjacent() {
        assert_eq!(
            extract_numbers("one two three", NumberOptions::default()),
            vec![1.0, 2.0, 3.0]
        );
        assert_eq!(
            extract_numbers("set volume to twelve and alarm to seven", NumberOptions::default()),
            vec![12.0, 7.0]
        );
    }

    #[test]
    fn test_ordinal_and_fraction_words() {
        assert_eq!(is_ordinal("third"), Some(3.0));
        assert_eq!(is_ordinal("21st"), Some(21.0));
        assert_eq!(is_fractional("half", true), Some(0.5));
        assert_eq!(is_fractional("Thirds", true), Some(1.0 / 3.0));
    }

    #[test]
    fn test_duration_sums_units() {
        let (duration, leftover) = extract_duration("3 days 8 hours 10 minutes and 49 seconds");
        assert_eq!(
            duration,
            Some(Duration::seconds(3 * 86400 + 8 * 3600 + 10 * 60 + 49))
        );
        assert_eq!(leftover, "and");
    }

    #[test]
    fn test_duration_with_spoken_numbers() {
        let (duration, leftover) = extract_duration("set a timer for five and a half minutes");
        assert_eq!(duration, Some(Duration::seconds(330)));
        assert_eq!(leftover, "set a timer for");
    }

    #[test]
    fn test_duration_empty() {
        assert_eq!(extract_duration(""), (None, String::new()));
        assert_eq!(
            extract_duration("no duration here"),
            (None, "no duration here".to_string())
        );
    }
}
