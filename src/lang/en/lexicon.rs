//! English number vocabulary
//!
//!     English is the one locale that speaks both scale systems: "billion"
//!     is 1e9 on the short scale and 1e12 on the long scale, so the scale
//!     and ordinal tables exist in two variants. Fraction words are the
//!     ordinal names reused as denominators ("third" is 1/3) plus their
//!     plurals, and ordinals also come as digit-suffix forms ("21st").

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::lexicon::NumberLexicon;
use crate::tokenize::{is_digit_string, parse_numeric};

static CARDINALS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, f64> = HashMap::new();
    for (word, value) in [
        ("zero", 0.0),
        ("one", 1.0),
        ("two", 2.0),
        ("three", 3.0),
        ("four", 4.0),
        ("five", 5.0),
        ("six", 6.0),
        ("seven", 7.0),
        ("eight", 8.0),
        ("nine", 9.0),
        ("ten", 10.0),
        ("eleven", 11.0),
        ("twelve", 12.0),
        ("thirteen", 13.0),
        ("fourteen", 14.0),
        ("fifteen", 15.0),
        ("sixteen", 16.0),
        ("seventeen", 17.0),
        ("eighteen", 18.0),
        ("nineteen", 19.0),
        ("twenty", 20.0),
        ("thirty", 30.0),
        ("forty", 40.0),
        ("fifty", 50.0),
        ("sixty", 60.0),
        ("seventy", 70.0),
        ("eighty", 80.0),
        ("ninety", 90.0),
    ] {
        m.insert(word, value);
    }
    m
});

fn with_plurals(entries: &[(&'static str, f64)]) -> HashMap<String, f64> {
    let mut m: HashMap<String, f64> = HashMap::new();
    for (word, value) in entries {
        m.insert(word.to_string(), *value);
        m.insert(format!("{}s", word), *value);
    }
    m
}

static SHORT_SCALE: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    with_plurals(&[
        ("hundred", 100.0),
        ("thousand", 1000.0),
        ("million", 1e6),
        ("billion", 1e9),
        ("trillion", 1e12),
        ("quadrillion", 1e15),
        ("quintillion", 1e18),
        ("sextillion", 1e21),
        ("septillion", 1e24),
        ("octillion", 1e27),
    ])
});

static LONG_SCALE: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    with_plurals(&[
        ("hundred", 100.0),
        ("thousand", 1000.0),
        ("million", 1e6),
        ("milliard", 1e9),
        ("billion", 1e12),
        ("billiard", 1e15),
        ("trillion", 1e18),
        ("trilliard", 1e21),
        ("quadrillion", 1e24),
        ("quadrilliard", 1e27),
    ])
});

static ORDINAL_BASE: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, f64> = HashMap::new();
    for (word, value) in [
        ("first", 1.0),
        ("second", 2.0),
        ("third", 3.0),
        ("fourth", 4.0),
        ("fifth", 5.0),
        ("sixth", 6.0),
        ("seventh", 7.0),
        ("eighth", 8.0),
        ("ninth", 9.0),
        ("tenth", 10.0),
        ("eleventh", 11.0),
        ("twelfth", 12.0),
        ("thirteenth", 13.0),
        ("fourteenth", 14.0),
        ("fifteenth", 15.0),
        ("sixteenth", 16.0),
        ("seventeenth", 17.0),
        ("eighteenth", 18.0),
        ("nineteenth", 19.0),
        ("twentieth", 20.0),
        ("thirtieth", 30.0),
        ("fortieth", 40.0),
        ("fiftieth", 50.0),
        ("sixtieth", 60.0),
        ("seventieth", 70.0),
        ("eightieth", 80.0),
        ("ninetieth", 90.0),
        ("hundredth", 100.0),
        ("thousandth", 1000.0),
        ("millionth", 1e6),
    ] {
        m.insert(word, value);
    }
    m
});

/// Ordinal names above a million differ by scale system.
fn scale_ordinal(word: &str, short_scale: bool) -> Option<f64> {
    let value = match (word, short_scale) {
        ("billionth", true) => 1e9,
        ("billionth", false) => 1e12,
        ("trillionth", true) => 1e12,
        ("trillionth", false) => 1e18,
        ("quadrillionth", true) => 1e15,
        ("quadrillionth", false) => 1e24,
        ("quintillionth", true) => 1e18,
        _ => return None,
    };
    Some(value)
}

/// Denominator named by a fraction word; plural forms included.
static FRACTION_DENOMINATORS: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let mut m = with_plurals(&[
        ("half", 2.0),
        ("third", 3.0),
        ("quarter", 4.0),
        ("fourth", 4.0),
        ("fifth", 5.0),
        ("sixth", 6.0),
        ("seventh", 7.0),
        ("eighth", 8.0),
        ("ninth", 9.0),
        ("tenth", 10.0),
        ("eleventh", 11.0),
        ("twelfth", 12.0),
        ("thirteenth", 13.0),
        ("fourteenth", 14.0),
        ("fifteenth", 15.0),
        ("sixteenth", 16.0),
        ("seventeenth", 17.0),
        ("eighteenth", 18.0),
        ("nineteenth", 19.0),
        ("twentieth", 20.0),
        ("thirtieth", 30.0),
        ("fortieth", 40.0),
        ("fiftieth", 50.0),
        ("sixtieth", 60.0),
        ("seventieth", 70.0),
        ("eightieth", 80.0),
        ("ninetieth", 90.0),
        ("hundredth", 100.0),
        ("thousandth", 1000.0),
        ("millionth", 1e6),
    ]);
    m.insert("halves".to_string(), 2.0);
    m
});

const TENS: &[&str] = &[
    "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety", "20", "30",
    "40", "50", "60", "70", "80", "90",
];

/// Value of a digit-suffix ordinal: "21st", "2nd", "13th".
fn suffix_ordinal(word: &str) -> Option<f64> {
    let digits = word
        .strip_suffix("st")
        .or_else(|| word.strip_suffix("nd"))
        .or_else(|| word.strip_suffix("rd"))
        .or_else(|| word.strip_suffix("th"))?;
    if is_digit_string(digits) {
        parse_numeric(digits)
    } else {
        None
    }
}

pub struct EnglishLexicon;

pub static LEXICON: EnglishLexicon = EnglishLexicon;

impl NumberLexicon for EnglishLexicon {
    fn cardinal(&self, word: &str) -> Option<f64> {
        CARDINALS.get(word).copied()
    }

    fn scale(&self, word: &str, short_scale: bool) -> Option<f64> {
        if short_scale {
            SHORT_SCALE.get(word).copied()
        } else {
            LONG_SCALE.get(word).copied()
        }
    }

    fn ordinal(&self, word: &str, short_scale: bool) -> Option<f64> {
        ORDINAL_BASE
            .get(word)
            .copied()
            .or_else(|| scale_ordinal(word, short_scale))
            .or_else(|| suffix_ordinal(word))
    }

    fn fraction(&self, word: &str, _context_word: &str, _short_scale: bool) -> Option<f64> {
        FRACTION_DENOMINATORS.get(word).map(|d| 1.0 / d)
    }

    fn is_sum_prefix(&self, word: &str) -> bool {
        TENS.contains(&word)
    }

    fn is_negative(&self, word: &str) -> bool {
        matches!(word, "minus" | "negative")
    }

    fn is_connector(&self, word: &str) -> bool {
        word == "and"
    }

    fn fraction_markers(&self) -> &[&'static str] {
        &["and"]
    }

    fn decimal_markers(&self) -> &[&'static str] {
        &["point"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_dependent_words() {
        assert_eq!(LEXICON.scale("billion", true), Some(1e9));
        assert_eq!(LEXICON.scale("billion", false), Some(1e12));
        assert_eq!(LEXICON.scale("milliard", false), Some(1e9));
        assert_eq!(LEXICON.scale("milliard", true), None);
    }

    #[test]
    fn test_suffix_ordinals() {
        assert_eq!(LEXICON.ordinal("21st", true), Some(21.0));
        assert_eq!(LEXICON.ordinal("2nd", true), Some(2.0));
        assert_eq!(LEXICON.ordinal("13th", true), Some(13.0));
        assert_eq!(LEXICON.ordinal("worst", true), None);
    }

    #[test]
    fn test_fraction_words() {
        assert_eq!(LEXICON.fraction("half", "half", true), Some(0.5));
        assert_eq!(LEXICON.fraction("thirds", "thirds", true), Some(1.0 / 3.0));
        assert_eq!(LEXICON.fraction("quarter", "quarter", true), Some(0.25));
        assert_eq!(LEXICON.fraction("and", "and", true), None);
    }
}
