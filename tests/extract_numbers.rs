//! Number extraction through the Language dispatch
//!
//! Locale-level behavior is covered next to each locale module; these
//! cases pin the cross-locale API surface: tag resolution, the earliest
//! number rule, utterance-order extraction and the scale switches.

use parlance::{Language, NumberOptions};
use rstest::rstest;

#[rstest]
#[case("en", "this is two beers", Some(2.0))]
#[case("en", "two hundred and fifty thousand ants", Some(250_000.0))]
#[case("en", "minus twenty degrees", Some(-20.0))]
#[case("en", "two and three quarters cups", Some(2.75))]
#[case("en", "no numbers here", None)]
#[case("de", "zwei bier", Some(2.0))]
#[case("de", "zwanzig tausend fünf hundert", Some(20_500.0))]
#[case("de", "kein zahlwort", None)]
#[case("uk", "це 2 тест", Some(2.0))]
#[case("uk", "пара тисяч пива", Some(2000.0))]
#[case("uk", "чотирьохсот тридцяти шести", Some(436.0))]
fn test_earliest_number(#[case] tag: &str, #[case] text: &str, #[case] expected: Option<f64>) {
    let lang = Language::from_tag(tag).unwrap();
    assert_eq!(lang.extract_number(text, NumberOptions::default()), expected);
}

#[test]
fn test_scale_switches() {
    let short = NumberOptions::default();
    let long = NumberOptions {
        short_scale: false,
        ..NumberOptions::default()
    };
    assert_eq!(
        Language::English.extract_number("two billion", short),
        Some(2e9)
    );
    assert_eq!(
        Language::English.extract_number("two billion", long),
        Some(2e12)
    );
    // the word itself switches the Ukrainian scan to the long scale
    assert_eq!(
        Language::Ukrainian.extract_number("шість трильйонів", short),
        Some(6e18)
    );
}

#[test]
fn test_numbers_in_utterance_order() {
    assert_eq!(
        Language::English.extract_numbers("one two three", NumberOptions::default()),
        vec![1.0, 2.0, 3.0]
    );
    assert_eq!(
        Language::Ukrainian.extract_numbers(
            "ось це сім вісім дев'ять і половина тест",
            NumberOptions::default()
        ),
        vec![7.0, 8.0, 9.5]
    );
}

#[test]
fn test_ordinal_and_fraction_words() {
    assert_eq!(Language::English.is_ordinal("21st"), Some(21.0));
    assert_eq!(Language::German.is_ordinal("dritte"), Some(3.0));
    assert_eq!(Language::Ukrainian.is_ordinal("третій"), Some(3.0));
    assert_eq!(Language::English.is_fractional("half", true), Some(0.5));
    assert_eq!(
        Language::Ukrainian.is_fractional("половина", true),
        Some(0.5)
    );
}

#[test]
fn test_unknown_tag_is_rejected() {
    assert!(Language::from_tag("tlh").is_err());
    assert!(Language::from_tag("").is_err());
    assert_eq!(Language::from_tag("uk_UA").unwrap(), Language::Ukrainian);
}
