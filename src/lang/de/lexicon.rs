//! German number vocabulary
//!
//!     German numbers are long scale: "billion" is 1e12 and every scale word
//!     above a thousand grows a plural form ("millionen", "milliarden").
//!     Ordinals are stored as stems ("dritt", "zwanzigst") and matched after
//!     stripping a case ending; fraction words cover "drittel".."zwanzigstel"
//!     plus the declined forms of "halb", and compounds like "zweidrittel"
//!     resolve by peeling a numerator off the front.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::tokenize::{parse_fraction_literal, parse_numeric};

pub static ARTICLES: &[&str] = &["der", "das", "die", "dem", "den"];

pub fn is_negative(word: &str) -> bool {
    word == "minus"
}

pub fn is_connector(word: &str) -> bool {
    word == "und"
}

/// Words that introduce spoken decimal digits ("zwei komma fünf").
pub fn is_comma(word: &str) -> bool {
    matches!(word, "komma" | "comma" | "punkt")
}

static CARDINALS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, f64> = HashMap::new();
    for (word, value) in [
        ("null", 0.0),
        ("eins", 1.0),
        ("ein", 1.0),
        ("eine", 1.0),
        ("einer", 1.0),
        ("eines", 1.0),
        ("einem", 1.0),
        ("einen", 1.0),
        ("zwei", 2.0),
        ("drei", 3.0),
        ("vier", 4.0),
        ("fünf", 5.0),
        ("sechs", 6.0),
        ("sieben", 7.0),
        ("acht", 8.0),
        ("neun", 9.0),
        ("zehn", 10.0),
        ("elf", 11.0),
        ("zwölf", 12.0),
        ("dreizehn", 13.0),
        ("vierzehn", 14.0),
        ("fünfzehn", 15.0),
        ("sechzehn", 16.0),
        ("siebzehn", 17.0),
        ("achtzehn", 18.0),
        ("neunzehn", 19.0),
        ("zwanzig", 20.0),
        ("dreißig", 30.0),
        ("vierzig", 40.0),
        ("fünfzig", 50.0),
        ("sechzig", 60.0),
        ("siebzig", 70.0),
        ("achtzig", 80.0),
        ("neunzig", 90.0),
        ("hundert", 100.0),
        ("zweihundert", 200.0),
        ("dreihundert", 300.0),
        ("vierhundert", 400.0),
        ("fünfhundert", 500.0),
        ("sechshundert", 600.0),
        ("siebenhundert", 700.0),
        ("achthundert", 800.0),
        ("neunhundert", 900.0),
        ("tausend", 1000.0),
        ("million", 1e6),
    ] {
        m.insert(word, value);
    }
    m
});

static LONG_SCALE: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, f64> = HashMap::new();
    for (word, value) in [
        ("hundert", 100.0),
        ("tausend", 1000.0),
        ("million", 1e6),
        ("milliarde", 1e9),
        ("billion", 1e12),
        ("billiarde", 1e15),
        ("trillion", 1e18),
        ("trilliarde", 1e21),
        ("quadrillion", 1e24),
        ("quadrilliarde", 1e27),
        // plural forms of everything above a thousand
        ("millionen", 1e6),
        ("milliarden", 1e9),
        ("billionen", 1e12),
        ("billiarden", 1e15),
        ("trillionen", 1e18),
        ("trilliarden", 1e21),
        ("quadrillionen", 1e24),
        ("quadrilliarden", 1e27),
    ] {
        m.insert(word, value);
    }
    m
});

/// Denominator carried by each fraction word.
static FRACTION_WORDS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, f64> = HashMap::new();
    for (word, denominator) in [
        ("halb", 2.0),
        ("halbe", 2.0),
        ("halben", 2.0),
        ("halbes", 2.0),
        ("halber", 2.0),
        ("halbem", 2.0),
        ("drittel", 3.0),
        ("viertel", 4.0),
        ("fünftel", 5.0),
        ("sechstel", 6.0),
        ("siebtel", 7.0),
        ("achtel", 8.0),
        ("neuntel", 9.0),
        ("zehntel", 10.0),
        ("elftel", 11.0),
        ("zwölftel", 12.0),
        ("dreizehntel", 13.0),
        ("vierzehntel", 14.0),
        ("fünfzehntel", 15.0),
        ("sechzehntel", 16.0),
        ("siebzehntel", 17.0),
        ("achtzehntel", 18.0),
        ("neunzehntel", 19.0),
        ("zwanzigstel", 20.0),
    ] {
        m.insert(word, denominator);
    }
    m
});

static ORDINAL_STEMS: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let mut m: HashMap<String, f64> = HashMap::new();
    for (value, stem) in [
        (1, "erst"),
        (2, "zweit"),
        (3, "dritt"),
        (4, "viert"),
        (5, "fünft"),
        (6, "sechst"),
        (7, "siebt"),
        (8, "acht"),
        (9, "neunt"),
        (10, "zehnt"),
        (11, "elft"),
        (12, "zwölft"),
        (13, "dreizehnt"),
        (14, "vierzehnt"),
        (15, "fünfzehnt"),
        (16, "sechzehnt"),
        (17, "siebzehnt"),
        (18, "achtzehnt"),
        (19, "neunzehnt"),
    ] {
        m.insert(stem.to_string(), value as f64);
    }
    let units = [
        "ein", "zwei", "drei", "vier", "fünf", "sechs", "sieben", "acht", "neun",
    ];
    for (value, stem) in [
        (20, "zwanzigst"),
        (30, "dreißigst"),
        (40, "vierzigst"),
        (50, "fünfzigst"),
        (60, "sechzigst"),
        (70, "siebzigst"),
        (80, "achtzigst"),
        (90, "neunzigst"),
    ] {
        m.insert(stem.to_string(), value as f64);
        for (i, unit) in units.iter().enumerate() {
            m.insert(format!("{}und{}", unit, stem), (value + i + 1) as f64);
        }
    }
    m.insert("einhundertst".to_string(), 100.0);
    m.insert("eintausendst".to_string(), 1000.0);
    for (stem, value) in [
        ("millionst", 1e6),
        ("milliardst", 1e9),
        ("billionst", 1e12),
        ("billiardst", 1e15),
        ("trillionst", 1e18),
        ("trilliardst", 1e21),
        ("quadrillionst", 1e24),
        ("quadrilliardst", 1e27),
    ] {
        m.insert(stem.to_string(), value);
    }
    m
});

pub fn cardinal(word: &str) -> Option<f64> {
    CARDINALS.get(word).copied()
}

pub fn long_scale(word: &str) -> Option<f64> {
    LONG_SCALE.get(word).copied()
}

pub fn is_multiplier(word: &str) -> bool {
    LONG_SCALE.contains_key(word)
}

/// Digit strings, cardinal words and scale words, in that lookup order.
pub fn number_value(word: &str) -> Option<f64> {
    parse_numeric(word)
        .or_else(|| cardinal(word))
        .or_else(|| long_scale(word))
}

/// True when the word is an exact fraction table entry (as opposed to a
/// compound like "zweidrittel" that merely contains one).
pub fn is_fraction_word(word: &str) -> bool {
    FRACTION_WORDS.contains_key(word)
}

/// Value of a fraction word or compound.
///
/// "viertel" is 0.25, "zweidrittel" is 2/3 and "eineindrittel" resolves the
/// leading numeral too, giving 1 + 1/3. Literal "2/3" counts as well.
pub fn fraction_value(input: &str) -> Option<f64> {
    let input = input.to_lowercase();
    if let Some(v) = parse_fraction_literal(&input) {
        return Some(v);
    }

    // longest fraction word first, so "dreizehntel" wins over "zehntel"
    let mut fractions: Vec<(&&str, &f64)> = FRACTION_WORDS.iter().collect();
    fractions.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

    let mut denominator = None;
    let mut remainder = String::new();
    for (word, value) in fractions {
        if input.contains(*word) {
            denominator = Some(*value);
            remainder = input.replace(*word, "");
            break;
        }
    }
    let denominator = denominator?;

    let mut numerator = 1.0;
    let mut prev_number = 0.0;
    if !remainder.is_empty() {
        if let Some(&n) = CARDINALS.get(remainder.as_str()) {
            numerator = n;
        } else {
            let mut numerals: Vec<(&&str, &f64)> = CARDINALS.iter().collect();
            numerals.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));
            let mut matched = false;
            for (numstring, &number) in numerals {
                if remainder.ends_with(*numstring) {
                    let head = remainder.replacen(*numstring, "", 1);
                    prev_number = CARDINALS.get(head.as_str()).copied().unwrap_or(0.0);
                    numerator = number;
                    matched = true;
                    break;
                }
            }
            if !matched {
                return None;
            }
        }
    }
    Some(prev_number + numerator / denominator)
}

/// Value of an ordinal word ("dritter" is 3) or a digit ordinal ("31.").
pub fn ordinal_number(word: &str) -> Option<f64> {
    for ending in ["en", "em", "es", "er", "e"] {
        if let Some(stem) = word.strip_suffix(ending) {
            if let Some(&value) = ORDINAL_STEMS.get(stem) {
                return Some(value);
            }
        }
    }
    if let Some(prefix) = word.strip_suffix('.') {
        if let Some(v) = parse_numeric(prefix) {
            return Some(v);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_values() {
        assert_eq!(fraction_value("viertel"), Some(0.25));
        assert_eq!(fraction_value("halber"), Some(0.5));
        assert_eq!(fraction_value("zweidrittel"), Some(2.0 / 3.0));
        assert_eq!(fraction_value("eineindrittel"), Some(1.0 + 1.0 / 3.0));
        assert_eq!(fraction_value("2/3"), Some(2.0 / 3.0));
        assert_eq!(fraction_value("bier"), None);
    }

    #[test]
    fn test_ordinal_forms() {
        assert_eq!(ordinal_number("erste"), Some(1.0));
        assert_eq!(ordinal_number("dritten"), Some(3.0));
        assert_eq!(ordinal_number("zwanzigstes"), Some(20.0));
        assert_eq!(ordinal_number("siebenundzwanzigster"), Some(27.0));
        assert_eq!(ordinal_number("31."), Some(31.0));
        assert_eq!(ordinal_number("drei"), None);
    }

    #[test]
    fn test_scale_plurals() {
        assert_eq!(long_scale("milliarden"), Some(1e9));
        assert_eq!(long_scale("billion"), Some(1e12));
        assert_eq!(cardinal("einer"), Some(1.0));
    }
}
