//! Word-to-value lexicon interface
//!
//!     A locale's number vocabulary is exposed to the shared scanners through
//!     the NumberLexicon trait: cardinal words, scale words (hundred,
//!     thousand, million...), ordinals and fraction words, plus the small
//!     word classes the scanner needs to make structural decisions (sum
//!     prefixes like "twenty", negatives, connectors, markers).
//!
//!     Lookup priority is explicit and fixed: a word that is simultaneously
//!     a cardinal and a scale word resolves as a cardinal, and ordinals are
//!     only consulted when the caller opted in. Locales keep their tables in
//!     plain maps behind once_cell statics; morphology-heavy locales
//!     (Ukrainian) fold case endings away in normalize_number_word before
//!     the tables are consulted.

/// The resolved class of a single word, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WordValue {
    /// A plain number word: "seven", "twenty", "zweihundert".
    Cardinal(f64),
    /// A power-of-ten multiplier word: "hundred", "million", "мільярд".
    Scale(f64),
    /// An ordinal word: "third", "dreißigster", "п'ятий".
    Ordinal(f64),
    /// A fraction word, carrying the value it contributes: "half" is 0.5.
    Fraction(f64),
}

impl WordValue {
    pub fn value(&self) -> f64 {
        match self {
            WordValue::Cardinal(v)
            | WordValue::Scale(v)
            | WordValue::Ordinal(v)
            | WordValue::Fraction(v) => *v,
        }
    }
}

/// Number vocabulary of one locale, as consumed by the shared scanners.
pub trait NumberLexicon: Sync {
    /// Value of a cardinal word, if the word is one.
    fn cardinal(&self, word: &str) -> Option<f64>;

    /// Value of a scale (multiplier) word under the requested scale system.
    fn scale(&self, word: &str, short_scale: bool) -> Option<f64>;

    /// Value of an ordinal word under the requested scale system.
    fn ordinal(&self, word: &str, short_scale: bool) -> Option<f64>;

    /// Value contributed by a fraction word.
    ///
    /// `context_word` is the word the scanner is currently standing on; when
    /// it equals `word` the fraction word itself is being classified, which
    /// lets a locale distinguish "fifths" used alone from "two fifths".
    fn fraction(&self, word: &str, context_word: &str, short_scale: bool) -> Option<f64>;

    /// Words that accept a following smaller number as a sum ("twenty two").
    fn is_sum_prefix(&self, word: &str) -> bool;

    /// Words that negate the following number.
    fn is_negative(&self, word: &str) -> bool;

    /// Connector words that may sit inside one spoken number ("two hundred
    /// and fifty"). Transparent to the scanner.
    fn is_connector(&self, word: &str) -> bool {
        let _ = word;
        false
    }

    /// Pair-count words ("пара тисяч" is two thousand).
    fn is_pair_word(&self, word: &str) -> bool {
        let _ = word;
        false
    }

    /// True when `value` is the value of some cardinal word of the locale.
    fn is_cardinal_value(&self, value: f64) -> bool {
        let _ = value;
        false
    }

    /// Words that join a whole part to a fraction part ("two and a half").
    fn fraction_markers(&self) -> &[&'static str];

    /// Words that join a whole part to spoken decimal digits ("one point five").
    fn decimal_markers(&self) -> &[&'static str];

    /// Fold case/plural morphology down to the table form of a number word.
    fn normalize_number_word(&self, word: &str) -> String {
        word.to_string()
    }

    /// Some locales switch the whole utterance to long scale when any long
    /// scale multiplier appears in it.
    fn forces_long_scale(&self, tokens: &[crate::tokenize::Token]) -> bool {
        let _ = tokens;
        false
    }

    /// Classify one word with the fixed priority: cardinal, then scale, then
    /// (only on request) ordinal.
    fn lookup(&self, word: &str, short_scale: bool, ordinals: bool) -> Option<WordValue> {
        if let Some(v) = self.cardinal(word) {
            return Some(WordValue::Cardinal(v));
        }
        if let Some(v) = self.scale(word, short_scale) {
            return Some(WordValue::Scale(v));
        }
        if ordinals {
            if let Some(v) = self.ordinal(word, short_scale) {
                return Some(WordValue::Ordinal(v));
            }
        }
        None
    }
}
