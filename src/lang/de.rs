//! German locale
//!
//!     German always reads large numbers on the long scale ("billion" is
//!     1e12), so the short-scale option has no effect here. Numbers route
//!     through the locale's own scanner (see src/lang/de/scanner.rs) rather
//!     than the generic one.

use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::duration::DurationRules;
use crate::error::DateTimeError;
use crate::scan::NumberOptions;
use crate::tokenize::tokenize;

pub mod datetime;
pub mod lexicon;
pub mod scanner;

/// Earliest number of the utterance. With `ordinals`, only ordinal values
/// count ("das dritte ei" is 3, "drei eier" is not a match).
pub fn extract_number(text: &str, options: NumberOptions) -> Option<f64> {
    let tokens = tokenize(&text.to_lowercase());
    let mut numbers = scanner::extract_numbers_with_text(&tokens, options.ordinals, true);
    if options.ordinals {
        numbers.retain(|n| n.value.is_ordinal());
    }
    numbers.first().and_then(|n| n.value.as_f64())
}

pub fn extract_numbers(text: &str, options: NumberOptions) -> Vec<f64> {
    let tokens = tokenize(&text.to_lowercase());
    scanner::extract_numbers_with_text(&tokens, options.ordinals, true)
        .into_iter()
        .filter_map(|n| n.value.as_f64())
        .collect()
}

pub fn is_fractional(word: &str, _short_scale: bool) -> Option<f64> {
    lexicon::fraction_value(word)
}

pub fn is_ordinal(word: &str) -> Option<f64> {
    lexicon::ordinal_number(&word.to_lowercase())
}

static DURATION: Lazy<DurationRules> = Lazy::new(|| {
    // stem + the singular/plural endings: "tag", "tage", "tagen", "stunde",
    // "stunden"...
    let unit = |stem: &str, seconds: f64| {
        (
            Regex::new(&format!(
                r"(?:^|\s)(?P<value>\d+(?:[.,]?\d+)?)\b(?:\s+|-)(?:{}[nes]?[sn]?)\b",
                stem
            ))
            .unwrap(),
            seconds,
        )
    };
    DurationRules {
        units: vec![
            unit("mikrosekunde", 1e-6),
            unit("millisekunde", 1e-3),
            unit("sekunde", 1.0),
            unit("minute", 60.0),
            unit("stunde", 3600.0),
            unit("tag", 86400.0),
            unit("woche", 604800.0),
        ],
        strip_digit_tokens: false,
    }
});

/// Sum of the duration phrases of the utterance, with the leftover text.
pub fn extract_duration(text: &str) -> (Option<Duration>, String) {
    if text.is_empty() {
        return (None, String::new());
    }
    let converted = scanner::convert_words_to_numbers(text, false, true);
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
        assert_eq!(extract_number("zwei bier", NumberOptions::default()), Some(2.0));
        assert_eq!(
            extract_number("zwanzig tausend fünf hundert", NumberOptions::default()),
            Some(20500.0)
        );
        assert_eq!(extract_number("kein zahlwort", NumberOptions::default()), None);
    }

    #[test]
    fn test_extract_number_ordinals_only() {
        let options = NumberOptions {
            ordinals: true,
            ..NumberOptions::default()
        };
        assert_eq!(extract_number("das dritte ei", options), Some(3.0));
        assert_eq!(extract_number("drei eier", options), None);
    }

    #[test]
    fn test_duration_with_spoken_numbers() {
        let (duration, leftover) = extract_duration("neun einhalb tage und 10 minuten");
        assert_eq!(
            duration,
            Some(Duration::seconds((9.5 * 86400.0) as i64 + 600))
        );
        assert_eq!(leftover, "und");
    }

    #[test]
    fn test_duration_plain_digits() {
        let (duration, leftover) = extract_duration("stelle den timer für 5 minuten");
        assert_eq!(duration, Some(Duration::seconds(300)));
        assert_eq!(leftover, "stelle den timer für");
    }
}
