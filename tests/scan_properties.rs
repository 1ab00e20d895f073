//! Properties of the number scanners
//!
//! The extractors must accept arbitrary text without panicking, report
//! digit strings back exactly, keep extracted numbers in utterance order,
//! and never report overlapping spans. One snapshot pins the span
//! reporting of the replace API.

use chrono::{TimeZone, Utc};
use parlance::lang::en::lexicon::LEXICON as EN_LEXICON;
use parlance::lang::uk::lexicon::LEXICON as UK_LEXICON;
use parlance::lexicon::NumberLexicon;
use parlance::scan::{convert_words_to_numbers, extract_numbers_with_text};
use parlance::tokenize::tokenize;
use parlance::{Language, NumberOptions};
use proptest::prelude::*;

const ALL: [Language; 3] = [Language::English, Language::German, Language::Ukrainian];

/// Number words, fillers and digit forms mixed across the locales; the
/// scanners treat foreign words as unknown text.
const WORD_SOUP: &[&str] = &[
    "twenty",
    "two",
    "hundred",
    "thousand",
    "and",
    "point",
    "five",
    "half",
    "minus",
    "1/2",
    "7",
    "250",
    "degrees",
    "set",
    "alarm",
    "чотириста",
    "тридцять",
    "шість",
    "тисяча",
    "пара",
    "і",
    "пива",
];

fn assert_spans_disjoint(lexicon: &dyn NumberLexicon, text: &str) {
    let tokens = tokenize(text);
    let found = extract_numbers_with_text(&tokens, lexicon, true, false, true);
    for pair in found.windows(2) {
        assert!(
            pair[0].end_index() < pair[1].start_index(),
            "overlapping spans in {:?}: {:?}",
            text,
            found
        );
    }
}

proptest! {
    #[test]
    fn extraction_accepts_arbitrary_text(text in "[ a-z0-9:./',?-]{0,40}") {
        let anchor = Utc.with_ymd_and_hms(2017, 6, 27, 13, 4, 0).unwrap();
        for lang in ALL {
            let _ = lang.extract_number(&text, NumberOptions::default());
            let _ = lang.extract_numbers(&text, NumberOptions::default());
            let _ = lang.extract_duration(&text);
            // impossible explicit dates may come back as Err; never a panic
            let _ = lang.extract_datetime(&text, &anchor, None);
        }
    }

    #[test]
    fn digit_strings_round_trip(n in 0u32..1_000_000) {
        let text = format!("value {} units", n);
        for lang in [Language::English, Language::Ukrainian] {
            prop_assert_eq!(
                lang.extract_number(&text, NumberOptions::default()),
                Some(n as f64)
            );
        }
    }

    #[test]
    fn number_spans_never_overlap(words in proptest::collection::vec(
        proptest::sample::select(WORD_SOUP), 0..8,
    )) {
        let text = words.join(" ").to_lowercase();
        assert_spans_disjoint(&EN_LEXICON, &text);
        assert_spans_disjoint(&UK_LEXICON, &text);
    }

    #[test]
    fn substitution_is_idempotent(words in proptest::collection::vec(
        proptest::sample::select(WORD_SOUP), 0..8,
    )) {
        let text = words.join(" ");
        let once = convert_words_to_numbers(&text, &EN_LEXICON, true, false);
        let twice = convert_words_to_numbers(&once, &EN_LEXICON, true, false);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn numbers_keep_utterance_order(values in proptest::collection::vec(1u32..999, 1..5)) {
        let text = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" stop ");
        let expected: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        prop_assert_eq!(
            Language::English.extract_numbers(&text, NumberOptions::default()),
            expected
        );
    }
}

#[test]
fn test_fraction_words_match_literals() {
    let options = NumberOptions::default();
    assert_eq!(
        Language::English.extract_number("one half", options),
        Language::English.extract_number("1/2", options)
    );
    assert_eq!(
        Language::English.extract_number("one third", options),
        Language::English.extract_number("1/3", options)
    );
    assert_eq!(
        Language::English.extract_number("two and three quarters", options),
        Some(2.75)
    );
}

#[test]
fn test_number_spans_snapshot() {
    let tokens = tokenize("it is twenty two degrees");
    let found = extract_numbers_with_text(&tokens, &EN_LEXICON, true, false, true);
    insta::assert_json_snapshot!(found);
}
