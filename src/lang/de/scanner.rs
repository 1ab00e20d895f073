//! German number scanner
//!
//!     German numbers do not fit the generic sum/multiply state machine: the
//!     connector "und" sits inside compounds, "komma" introduces spoken
//!     decimal digits one token at a time, fractions attach to the number
//!     before them ("neun einhalb" is 9.5) and a fraction followed by a bare
//!     hour is a clock time ("drei viertel acht" is 7:45). This scanner
//!     tracks those cases directly, accumulating finished portions in a sum
//!     list the way the generic scanner parks scale portions.

use crate::lang::de::lexicon;
use crate::scan::{self, NumberValue, ReplaceableNumber};
use crate::tokenize::{tokenize, Token};

fn truthy(v: Option<f64>) -> bool {
    v.map_or(false, |v| v != 0.0)
}

/// One scan pass over the tokens. Returns the assembled value and the
/// tokens that spelled it; the token list can be non-empty with no value
/// when the scan only saw trivia words.
fn scan_tokens(tokens: &[Token]) -> (Option<NumberValue>, Vec<Token>) {
    let mut number_words: Vec<Token> = Vec::new();
    let mut val: Option<NumberValue> = None;
    let mut part: Option<f64> = None;
    let mut current: Option<f64> = None;
    let mut comma: Option<Token> = None;
    let mut to_sum: Vec<f64> = Vec::new();

    for (idx, token) in tokens.iter().enumerate() {
        let prev_val = current;
        current = None;

        let word = token.word.to_lowercase();

        if lexicon::is_connector(&word) && number_words.is_empty() {
            continue;
        }
        if lexicon::is_negative(&word) || lexicon::is_connector(&word) || lexicon::is_comma(&word) {
            number_words.push(token.clone());
            if lexicon::is_comma(&word) {
                comma = Some(token.clone());
                current = part.or(prev_val);
            }
            continue;
        }

        let prev_word = if idx > 0 {
            tokens[idx - 1].word.to_lowercase()
        } else {
            String::new()
        };
        let next_word = tokens
            .get(idx + 1)
            .map(|t| t.word.to_lowercase())
            .unwrap_or_default();

        let known = lexicon::number_value(&word).is_some() || truthy(lexicon::fraction_value(&word));
        if !known {
            if let Some(v) = part {
                to_sum.push(v);
            }
            if !to_sum.is_empty() {
                val = Some(NumberValue::Number(to_sum.iter().sum()));
            }
            let all_trivia = number_words.iter().all(|t| {
                let w = t.word.to_lowercase();
                lexicon::ARTICLES.contains(&w.as_str())
                    || lexicon::is_negative(&w)
                    || lexicon::is_connector(&w)
            });
            let repeats_last = match (&val, number_words.last()) {
                (Some(v), Some(t)) => v.render() == t.word,
                _ => false,
            };
            if !number_words.is_empty() && (!all_trivia || repeats_last) {
                break;
            }
            number_words.clear();
            to_sum.clear();
            val = None;
            part = None;
            continue;
        }

        let word_is_multiplier = lexicon::is_multiplier(&word);
        let chains = word_is_multiplier
            || lexicon::is_multiplier(&prev_word)
            || lexicon::is_connector(&prev_word)
            || lexicon::is_negative(&prev_word)
            || lexicon::is_comma(&prev_word)
            || lexicon::number_value(&prev_word).is_some()
            || lexicon::ordinal_number(&word).is_some()
            || truthy(lexicon::fraction_value(&prev_word));
        if chains {
            number_words.push(token.clone());
        } else {
            number_words = vec![token.clone()];
        }

        part = lexicon::number_value(&word);
        current = part;

        if current.is_some() && lexicon::is_negative(&prev_word) {
            part = current.map(|v| -v);
        }

        // "zwei millionen": the finished product goes on the sum pile
        if let Some(p) = prev_val {
            if word_is_multiplier || matches!(word.as_str(), "einer" | "eines" | "einem") {
                let c = current.unwrap_or(0.0);
                let product = p * c;
                to_sum.push(if product != 0.0 { product } else { c });
                part = None;
                current = None;
            }
        }

        let fraction_val = lexicon::fraction_value(&word).filter(|v| *v != 0.0);
        if let Some(f) = fraction_val {
            match prev_val {
                // compound fraction: "neun einhalb" is 9 + 0.5
                Some(p) if prev_word != "eine" && !lexicon::is_fraction_word(&word) => {
                    part = Some(p + f);
                    if !lexicon::is_connector(&prev_word) && !number_words.contains(&tokens[idx - 1])
                    {
                        number_words.push(tokens[idx - 1].clone());
                    }
                }
                // "ein halber" is 1 * 0.5
                Some(p) => {
                    part = Some(p * f);
                    if !number_words.contains(&tokens[idx - 1]) {
                        number_words.push(tokens[idx - 1].clone());
                    }
                }
                None => {
                    part = Some(f);
                }
            }
            current = part;
        }

        // two numbers directly after another with no relation: report the
        // first, give the current token back
        if (crate::tokenize::parse_numeric(&prev_word).is_some()
            || lexicon::cardinal(&prev_word).is_some())
            && fraction_val.is_none()
            && !truthy(lexicon::fraction_value(&next_word))
            && to_sum.is_empty()
        {
            val = prev_val.map(NumberValue::Number);
            number_words.pop();
            break;
        }

        // a fractional value followed by a bare hour is a spoken clock
        // time: "drei viertel acht" is 7:45
        if prev_val.map_or(false, |p| p.fract() != 0.0)
            && lexicon::number_value(&word).is_some()
            && to_sum.is_empty()
        {
            let next_spells_number = match tokens.get(idx + 1) {
                Some(t) => !scan_tokens(std::slice::from_ref(t)).1.is_empty(),
                None => false,
            };
            if next_word.is_empty() || !next_spells_number {
                let hour = part.unwrap_or(0.0) as i64 - 1;
                let minute = (60.0 * prev_val.unwrap_or(0.0)) as i64;
                val = Some(NumberValue::Clock { hour, minute });
                break;
            }
        }

        // spoken decimals: every digit after "komma" shifts one place
        if let (Some(c), Some(cm)) = (current, &comma) {
            to_sum.push(if c >= 10.0 {
                c
            } else {
                c / 10f64.powi((token.index - cm.index) as i32)
            });
            part = None;
            current = None;
        }

        if current.is_some()
            && (lexicon::is_connector(&next_word)
                || lexicon::is_comma(&next_word)
                || next_word.is_empty())
        {
            let flush = part.filter(|v| *v != 0.0).or(current).unwrap_or(0.0);
            to_sum.push(flush);
            part = None;
            current = None;
        }

        if next_word.is_empty() && !number_words.is_empty() {
            let sum: f64 = to_sum.iter().sum();
            val = if sum != 0.0 {
                Some(NumberValue::Number(sum))
            } else {
                part.map(NumberValue::Number)
            };
        }
    }

    (val, number_words)
}

/// Extract one number. With `ordinals`, the first ordinal token wins before
/// any real-number scan happens.
pub fn extract_number_with_text(tokens: &[Token], ordinals: bool) -> Option<ReplaceableNumber> {
    if ordinals {
        for token in tokens {
            if let Some(v) = lexicon::ordinal_number(&token.word.to_lowercase()) {
                return Some(ReplaceableNumber {
                    value: NumberValue::Ordinal(v),
                    tokens: vec![token.clone()],
                });
            }
        }
    }
    let (value, tokens) = scan_tokens(tokens);
    value.map(|value| ReplaceableNumber { value, tokens })
}

/// Extract every number, earliest first. With `fractions` off, fractional
/// values are still consumed but not reported.
pub fn extract_numbers_with_text(
    tokens: &[Token],
    ordinals: bool,
    fractions: bool,
) -> Vec<ReplaceableNumber> {
    let scan = |tokens: &[Token]| extract_number_with_text(tokens, ordinals);
    let mut results = scan::extract_all(tokens, &scan);
    if !fractions {
        results.retain(|n| n.value.as_f64().map_or(true, |v| v.fract() == 0.0));
    }
    results
}

/// Substitute spoken numbers with digits: "zwei stunden" becomes "2 stunden",
/// "drei viertel acht" becomes "7:45".
pub fn convert_words_to_numbers(text: &str, ordinals: bool, fractions: bool) -> String {
    let tokens = tokenize(&text.to_lowercase());
    let found = extract_numbers_with_text(&tokens, ordinals, fractions);
    scan::substitute_numbers(&tokens, &found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(text: &str) -> Option<f64> {
        extract_number_with_text(&tokenize(&text.to_lowercase()), false)
            .and_then(|n| n.value.as_f64())
    }

    #[test]
    fn test_scale_portions_sum() {
        assert_eq!(number("dreißig tausend vier hundert zwanzig"), Some(30420.0));
        assert_eq!(number("zwei millionen fünfhundert tausend"), Some(2_500_000.0));
    }

    #[test]
    fn test_spoken_decimals() {
        assert_eq!(number("zwei komma fünf"), Some(2.5));
        assert_eq!(number("eins komma vier fünf"), Some(1.45));
    }

    #[test]
    fn test_compound_fraction() {
        assert_eq!(number("neun einhalb"), Some(9.5));
        assert_eq!(number("ein halber becher"), Some(0.5));
    }

    #[test]
    fn test_spoken_clock_renders() {
        let tokens = tokenize("drei viertel acht");
        let found = extract_number_with_text(&tokens, false).unwrap();
        assert_eq!(found.value, NumberValue::Clock { hour: 7, minute: 45 });
        assert_eq!(found.value.render(), "7:45");
    }

    #[test]
    fn test_adjacent_numbers_split() {
        let tokens = tokenize("eins zwei drei");
        let values: Vec<f64> = extract_numbers_with_text(&tokens, false, true)
            .into_iter()
            .filter_map(|n| n.value.as_f64())
            .collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_ordinal_short_circuit() {
        let tokens = tokenize("das dritte ei");
        let found = extract_number_with_text(&tokens, true).unwrap();
        assert_eq!(found.value, NumberValue::Ordinal(3.0));
    }
}
