//! Marker-joined fractions and spoken decimals
//!
//!     "two and three quarters" and "one point five" both split an utterance
//!     in two around a marker word. Each side is resolved by recursing into
//!     the number pipeline; the left side runs with fraction readings
//!     disabled so resolution cannot recurse forever.

use crate::lexicon::NumberLexicon;
use crate::scan::{extract_numbers_with_text, NumberValue, ReplaceableNumber};
use crate::tokenize::{partition_once, Token};

/// Extract a whole-plus-fraction reading, "2 and 3/4".
///
/// "one half" on its own carries no marker and is left to the whole-number
/// scanner.
pub fn extract_fraction(
    tokens: &[Token],
    lexicon: &dyn NumberLexicon,
    short_scale: bool,
    ordinals: bool,
) -> Option<ReplaceableNumber> {
    for marker in lexicon.fraction_markers() {
        let Some((left, mid, right)) =
            partition_once(tokens, |t| t.word.to_lowercase() == *marker)
        else {
            continue;
        };
        let numbers1 = extract_numbers_with_text(left, lexicon, short_scale, ordinals, false);
        let numbers2 = extract_numbers_with_text(right, lexicon, short_scale, ordinals, true);
        if numbers1.is_empty() || numbers2.is_empty() {
            return None;
        }

        // the whole part must not itself be a fraction, the other side must be
        let whole = numbers1.last()?;
        let part = numbers2.first()?;
        let (whole_val, part_val) = (whole.value.as_f64()?, part.value.as_f64()?);
        if whole_val >= 1.0 && part_val > 0.0 && part_val < 1.0 {
            let mut combined = whole.tokens.clone();
            combined.push(mid.clone());
            combined.extend(part.tokens.iter().cloned());
            return Some(ReplaceableNumber {
                value: NumberValue::Number(whole_val + part_val),
                tokens: combined,
            });
        }
    }
    None
}

/// Extract a spoken decimal reading, "2 point 5".
///
/// The right side is read as digits after the marker: "three point fourteen"
/// is 3.14, not 3 + 14.
pub fn extract_decimal(
    tokens: &[Token],
    lexicon: &dyn NumberLexicon,
    short_scale: bool,
    ordinals: bool,
) -> Option<ReplaceableNumber> {
    for marker in lexicon.decimal_markers() {
        let Some((left, mid, right)) =
            partition_once(tokens, |t| t.word.to_lowercase() == *marker)
        else {
            continue;
        };
        let numbers1 = extract_numbers_with_text(left, lexicon, short_scale, ordinals, false);
        let numbers2 = extract_numbers_with_text(right, lexicon, short_scale, ordinals, false);
        if numbers1.is_empty() || numbers2.is_empty() {
            return None;
        }

        let whole = numbers1.last()?;
        let digits = numbers2.first()?;
        let digits_val = digits.value.as_f64()?;
        if digits_val >= 0.0 && digits_val.fract() == 0.0 && !digits.text().contains('.') {
            let width = format!("{}", digits_val as i64).len() as i32;
            let value = whole.value.as_f64()? + digits_val / 10f64.powi(width);
            let mut combined = whole.tokens.clone();
            combined.push(mid.clone());
            combined.extend(digits.tokens.iter().cloned());
            return Some(ReplaceableNumber {
                value: NumberValue::Number(value),
                tokens: combined,
            });
        }
    }
    None
}
