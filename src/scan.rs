//! Number scanning over token streams
//!
//!     The entry points here drive the locale-independent part of number
//!     extraction: try a fraction reading ("two and three quarters"), then a
//!     decimal reading ("one point five"), then fall back to the whole-number
//!     state machine. Multi-number extraction repeats the single scan,
//!     masking each consumed span with a placeholder token so indices stay
//!     stable, until nothing more matches.
//!
//!     German routes through its own scanner (src/lang/de) because its
//!     grammar differs structurally; it still reuses the masking loop and
//!     the word substitution pass defined here.

use serde::Serialize;

use crate::lexicon::NumberLexicon;
use crate::tokenize::{tokenize, Token};

pub mod fractions;
pub mod whole_number;

/// Token word used to mask consumed spans between scan rounds.
pub const PLACEHOLDER: &str = "<placeholder>";

/// Keyword arguments of the number extraction API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberOptions {
    /// Short scale ("billion" is 1e9) vs long scale ("billion" is 1e12).
    pub short_scale: bool,
    /// Resolve ordinal words to their values ("third" is 3, not 1/3).
    pub ordinals: bool,
}

impl Default for NumberOptions {
    fn default() -> Self {
        NumberOptions {
            short_scale: true,
            ordinals: false,
        }
    }
}

/// A resolved number value.
///
/// Most values are plain numbers. German keeps two extra shapes: ordinals
/// ("dritter" renders back into text as "3.") and spoken clock fractions
/// ("drei viertel acht" renders as "7:45" for the datetime pass to pick up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum NumberValue {
    Number(f64),
    Ordinal(f64),
    Clock { hour: i64, minute: i64 },
}

impl NumberValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberValue::Number(v) | NumberValue::Ordinal(v) => Some(*v),
            NumberValue::Clock { .. } => None,
        }
    }

    pub fn is_ordinal(&self) -> bool {
        matches!(self, NumberValue::Ordinal(_))
    }

    /// Digit form used when substituting the value back into the utterance.
    pub fn render(&self) -> String {
        match self {
            NumberValue::Number(v) => {
                if v.fract() == 0.0 && v.abs() < 9.0e18 {
                    format!("{}", *v as i64)
                } else {
                    format!("{}", v)
                }
            }
            NumberValue::Ordinal(v) => format!("{}.", *v as i64),
            NumberValue::Clock { hour, minute } => format!("{}:{:02}", hour, minute),
        }
    }
}

/// A number found in an utterance, with the tokens that spelled it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaceableNumber {
    pub value: NumberValue,
    pub tokens: Vec<Token>,
}

impl ReplaceableNumber {
    pub fn start_index(&self) -> usize {
        self.tokens.first().map(|t| t.index).unwrap_or(0)
    }

    pub fn end_index(&self) -> usize {
        self.tokens.last().map(|t| t.index).unwrap_or(0)
    }

    pub fn text(&self) -> String {
        let words: Vec<&str> = self.tokens.iter().map(|t| t.word.as_str()).collect();
        words.join(" ")
    }
}

/// Extract one number from a token stream.
///
/// Fraction and decimal readings are preferred over the whole-number scan;
/// `fractional_numbers` turns them off for the recursive calls that resolve
/// the two sides of a marker.
pub fn extract_number_with_text(
    tokens: &[Token],
    lexicon: &dyn NumberLexicon,
    short_scale: bool,
    ordinals: bool,
    fractional_numbers: bool,
) -> Option<ReplaceableNumber> {
    if fractional_numbers {
        if let Some(found) = fractions::extract_fraction(tokens, lexicon, short_scale, ordinals) {
            return Some(found);
        }
        if let Some(found) = fractions::extract_decimal(tokens, lexicon, short_scale, ordinals) {
            return Some(found);
        }
    }
    whole_number::extract_whole_number(tokens, lexicon, short_scale, ordinals)
}

/// Extract every number from a token stream, earliest first.
///
/// Repeats the single scan, masking each consumed span with
/// [`PLACEHOLDER`] tokens so the indices of untouched tokens survive.
pub fn extract_numbers_with_text(
    tokens: &[Token],
    lexicon: &dyn NumberLexicon,
    short_scale: bool,
    ordinals: bool,
    fractional_numbers: bool,
) -> Vec<ReplaceableNumber> {
    let scan = |tokens: &[Token]| {
        extract_number_with_text(tokens, lexicon, short_scale, ordinals, fractional_numbers)
    };
    extract_all(tokens, &scan)
}

/// Masking loop shared by the generic pipeline and the German scanner.
pub fn extract_all(
    tokens: &[Token],
    scan: &dyn Fn(&[Token]) -> Option<ReplaceableNumber>,
) -> Vec<ReplaceableNumber> {
    let mut tokens = tokens.to_vec();
    let mut results: Vec<ReplaceableNumber> = Vec::new();
    while let Some(found) = scan(&tokens) {
        if found.tokens.is_empty() {
            break;
        }
        for token in tokens.iter_mut() {
            if found.start_index() <= token.index && token.index <= found.end_index() {
                token.word = PLACEHOLDER.to_string();
            }
        }
        results.push(found);
    }
    results.sort_by_key(|n| n.start_index());
    results
}

/// Rebuild the utterance with every found number substituted by its digits.
pub fn substitute_numbers(tokens: &[Token], found: &[ReplaceableNumber]) -> String {
    let mut pending: std::collections::VecDeque<&ReplaceableNumber> = found.iter().collect();
    let mut words: Vec<String> = Vec::new();
    for token in tokens {
        match pending.front() {
            None => words.push(token.word.clone()),
            Some(number) if token.index < number.start_index() => {
                words.push(token.word.clone());
            }
            Some(number) => {
                if token.index == number.start_index() {
                    words.push(number.value.render());
                }
                if token.index == number.end_index() {
                    pending.pop_front();
                }
            }
        }
    }
    words.join(" ")
}

/// Lowercase, scan and substitute: "it is twenty two degrees" becomes
/// "it is 22 degrees". Shared front-end for duration and datetime parsing.
pub fn convert_words_to_numbers(
    text: &str,
    lexicon: &dyn NumberLexicon,
    short_scale: bool,
    ordinals: bool,
) -> String {
    let tokens = tokenize(&text.to_lowercase());
    let found = extract_numbers_with_text(&tokens, lexicon, short_scale, ordinals, true);
    substitute_numbers(&tokens, &found)
}

/// Extract the earliest number of an utterance.
pub fn extract_number(
    text: &str,
    lexicon: &dyn NumberLexicon,
    options: NumberOptions,
) -> Option<f64> {
    let tokens = tokenize(&text.to_lowercase());
    extract_numbers_with_text(
        &tokens,
        lexicon,
        options.short_scale,
        options.ordinals,
        true,
    )
    .into_iter()
    .find_map(|n| n.value.as_f64())
}

/// Extract every number of an utterance, in utterance order.
pub fn extract_numbers(
    text: &str,
    lexicon: &dyn NumberLexicon,
    options: NumberOptions,
) -> Vec<f64> {
    let tokens = tokenize(&text.to_lowercase());
    extract_numbers_with_text(
        &tokens,
        lexicon,
        options.short_scale,
        options.ordinals,
        true,
    )
    .into_iter()
    .filter_map(|n| n.value.as_f64())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_trims_integral_values() {
        assert_eq!(NumberValue::Number(22.0).render(), "22");
        assert_eq!(NumberValue::Number(1.5).render(), "1.5");
        assert_eq!(NumberValue::Number(-30.0).render(), "-30");
        assert_eq!(NumberValue::Ordinal(3.0).render(), "3.");
        assert_eq!(NumberValue::Clock { hour: 7, minute: 45 }.render(), "7:45");
    }

    #[test]
    fn test_substitute_replaces_span_with_one_word() {
        let tokens = tokenize("wake me at twenty two degrees");
        let found = vec![ReplaceableNumber {
            value: NumberValue::Number(22.0),
            tokens: tokens[3..5].to_vec(),
        }];
        assert_eq!(
            substitute_numbers(&tokens, &found),
            "wake me at 22 degrees"
        );
    }
}
