//! Ukrainian locale
//!
//!     Numbers go through the generic scanner with the Ukrainian
//!     vocabulary; declined numerals are folded onto their table forms
//!     first. "трильйон" is a long-scale word, so its presence anywhere in
//!     the utterance switches the whole scan to the long scale. Durations
//!     read digit + unit-stem pairs, with one optional ending class
//!     covering the declined unit forms.

use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::duration::DurationRules;
use crate::error::DateTimeError;
use crate::lexicon::NumberLexicon;
use crate::scan::{self, NumberOptions};

pub mod datetime;
pub mod lexicon;
pub mod morphology;

use lexicon::LEXICON;

pub fn extract_number(text: &str, options: NumberOptions) -> Option<f64> {
    scan::extract_number(text, &LEXICON, options)
}

pub fn extract_numbers(text: &str, options: NumberOptions) -> Vec<f64> {
    scan::extract_numbers(text, &LEXICON, options)
}

/// Value of a lone fraction word: "половина" is 0.5, "п'ятих" is 1/5.
pub fn is_fractional(word: &str, short_scale: bool) -> Option<f64> {
    let word = word.to_lowercase();
    let d = LEXICON.fraction(&word, &word, short_scale)?;
    if d >= 1.0 {
        Some(1.0 / d)
    } else {
        Some(d)
    }
}

pub fn is_ordinal(word: &str) -> Option<f64> {
    LEXICON.ordinal(&word.to_lowercase(), true)
}

static DURATION: Lazy<DurationRules> = Lazy::new(|| {
    let unit = |stem: &str, seconds: f64| {
        (
            Regex::new(&format!(
                r"(?:^|\s)(?P<value>\d+(?:\.?\d+)?)(?:\s+|-){}(?:ами|ів|ни|ну|ку|ин|и|і|у|я)?\b",
                stem
            ))
            .unwrap(),
            seconds,
        )
    };
    DurationRules {
        units: vec![
            unit("мікросекунд", 1e-6),
            unit("мілісекунд", 1e-3),
            unit("секунд", 1.0),
            unit("хвилин", 60.0),
            unit("годин", 3600.0),
            unit("д(?:ень|н)", 86400.0),
            unit("тиж(?:день|н)", 7.0 * 86400.0),
        ],
        strip_digit_tokens: true,
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
        assert_eq!(extract_number("це 2 тест", options), Some(2.0));
        assert_eq!(extract_number("тут немає чисел", options), None);
        let ordinals = NumberOptions {
            ordinals: true,
            ..NumberOptions::default()
        };
        assert_eq!(extract_number("це перший тест", ordinals), Some(1.0));
    }

    #[test]
    fn test_declined_forms_sum() {
        let options = NumberOptions::default();
        assert_eq!(
            extract_number("чотирьохсот тридцяти шести", options),
            Some(436.0)
        );
        assert_eq!(extract_number("двох пив", options), Some(2.0));
    }

    #[test]
    fn test_hundreds_and_tens_span_one_number() {
        let options = NumberOptions::default();
        assert_eq!(
            extract_number("чотириста тридцять шість", options),
            Some(436.0)
        );
        // the whole phrase is one match, not a 400 plus a 436
        assert_eq!(
            extract_numbers("чотириста тридцять шість", options),
            vec![436.0]
        );
    }

    #[test]
    fn test_pair_word_doubles() {
        assert_eq!(
            extract_number("пара тисяч пива", NumberOptions::default()),
            Some(2000.0)
        );
    }

    #[test]
    fn test_trillion_is_long_scale() {
        assert_eq!(
            extract_number("шість трильйонів", NumberOptions::default()),
            Some(6e18)
        );
    }

    #[test]
    fn test_extract_numbers_with_fraction() {
        assert_eq!(
            extract_numbers("ось це сім вісім дев'ять і половина тест", NumberOptions::default()),
            vec![7.0, 8.0, 9.5]
        );
    }

    #[test]
    fn test_fraction_and_ordinal_words() {
        assert_eq!(is_fractional("половина", true), Some(0.5));
        assert_eq!(is_fractional("третина", true), Some(1.0 / 3.0));
        assert_eq!(is_ordinal("третій"), Some(3.0));
        assert_eq!(is_ordinal("погода"), None);
    }

    #[test]
    fn test_duration_sums_units() {
        let (duration, _) = extract_duration("3 дні 8 годин 10 хвилин і 49 секунд");
        assert_eq!(
            duration,
            Some(Duration::seconds(3 * 86400 + 8 * 3600 + 10 * 60 + 49))
        );
    }

    #[test]
    fn test_duration_with_spoken_numbers() {
        let (duration, leftover) = extract_duration("встанови таймер на п'ять хвилин");
        assert_eq!(duration, Some(Duration::seconds(300)));
        assert_eq!(leftover, "встанови таймер на");
    }

    #[test]
    fn test_duration_empty() {
        assert_eq!(extract_duration(""), (None, String::new()));
    }
}
