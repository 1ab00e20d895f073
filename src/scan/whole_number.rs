//! Whole-number scanning state machine
//!
//!     Left-to-right scan that resolves spoken whole numbers: sums ("twenty
//!     two"), multipliers ("two hundred", "five thousand"), negatives,
//!     standalone fraction words ("half") and digit strings. Fractions with
//!     markers and spoken decimals are peeled off before this scanner runs
//!     (see src/scan/fractions.rs).

use crate::lexicon::NumberLexicon;
use crate::scan::{NumberValue, ReplaceableNumber};
use crate::tokenize::{is_digit_string, parse_fraction_literal, parse_numeric, Token};

/// Working state of one scan pass.
///
/// `val` is the number being assembled, `prev_val` the value carried from
/// the previous token, `to_sum` the finished scale portions of a long
/// number ("nine million nine hundred seven thousand..." accumulates
/// 9000000 and 907000 there while the scan keeps going).
#[derive(Debug, Default)]
struct ScanState {
    val: Option<f64>,
    prev_val: Option<f64>,
    to_sum: Vec<f64>,
    number_words: Vec<Token>,
}

fn truthy(v: Option<f64>) -> bool {
    v.map_or(false, |v| v != 0.0)
}

/// Scan a token stream for one spoken whole number.
///
/// Returns the assembled value and the tokens that spelled it; the match
/// reported is the last one the scan was still extending when the stream
/// ended or broke. Callers that want every number mask and rescan.
pub fn extract_whole_number(
    tokens: &[Token],
    lexicon: &dyn NumberLexicon,
    short_scale: bool,
    ordinals: bool,
) -> Option<ReplaceableNumber> {
    let short_scale = if lexicon.forces_long_scale(tokens) {
        false
    } else {
        short_scale
    };

    let mut state = ScanState::default();
    let mut skip_next = false;

    for (idx, token) in tokens.iter().enumerate() {
        let mut current_val: Option<f64> = None;
        if skip_next {
            skip_next = false;
            continue;
        }

        let mut word = token.word.to_lowercase();

        if lexicon.is_negative(&word) {
            state.number_words.push(token.clone());
            continue;
        }
        if lexicon.is_connector(&word) {
            // connectors ride along inside a number but never start one
            if !state.number_words.is_empty() {
                state.number_words.push(token.clone());
            }
            continue;
        }

        // effective neighbours, with connectors skipped and morphology folded
        let prev_word = {
            let mut j = idx;
            let mut prev = String::new();
            while j > 0 {
                j -= 1;
                let candidate = tokens[j].word.to_lowercase();
                if lexicon.is_connector(&candidate) {
                    continue;
                }
                prev = candidate;
                break;
            }
            lexicon.normalize_number_word(&prev)
        };
        let next_word = tokens
            .get(idx + 1)
            .map(|t| lexicon.normalize_number_word(&t.word.to_lowercase()))
            .unwrap_or_default();

        // trailing-dot ordinals, "31."
        if word.ends_with('.') && parse_numeric(&word[..word.len() - 1]).is_some() {
            word.truncate(word.len() - 1);
        }

        if !ordinals && lexicon.cardinal(&word).is_none() {
            word = lexicon.normalize_number_word(&word);
        }

        let word_is_scale = lexicon.scale(&word, short_scale).is_some();
        let known = word_is_scale
            || lexicon.cardinal(&word).is_some()
            || lexicon.is_sum_prefix(&word)
            || lexicon.is_pair_word(&word)
            || (ordinals && lexicon.ordinal(&word, short_scale).is_some())
            || parse_numeric(&word).is_some()
            || lexicon.fraction(&word, &word, short_scale).is_some()
            || parse_fraction_literal(&word).is_some();
        if !known {
            let only_trivia = state.number_words.iter().all(|t| {
                let w = t.word.to_lowercase();
                lexicon.is_negative(&w) || lexicon.is_connector(&w)
            });
            if !state.number_words.is_empty() && !only_trivia {
                break;
            }
            state.number_words.clear();
            continue;
        }

        let prev_is_scale = lexicon.scale(&prev_word, short_scale).is_some();
        if !word_is_scale
            && !prev_is_scale
            && !lexicon.is_sum_prefix(&prev_word)
            && !(ordinals && lexicon.ordinal(&prev_word, short_scale).is_some())
            && !lexicon.is_negative(&prev_word)
        {
            // nothing chains this word to the previous one: start over
            state.number_words = vec![token.clone()];
        } else if lexicon.is_sum_prefix(&prev_word) && lexicon.is_sum_prefix(&word) {
            // hundreds take a tens word as a sum ("чотириста тридцять");
            // two prefixes that cannot combine start a fresh match
            let combines = state.prev_val.map_or(false, |p| p >= 100.0)
                && lexicon
                    .cardinal(&word)
                    .or_else(|| parse_numeric(&word))
                    .map_or(false, |v| v < 100.0);
            if combines {
                state.number_words.push(token.clone());
            } else {
                state.number_words = vec![token.clone()];
            }
        } else {
            state.number_words.push(token.clone());
        }

        let mut val = state.val;

        if let Some(n) = parse_numeric(&word) {
            val = Some(n);
            current_val = val;
        }
        if let Some(resolved) = lexicon.lookup(&word, short_scale, ordinals) {
            val = Some(resolved.value());
            current_val = val;
        }

        // "second one", "third one"
        if ordinals && lexicon.ordinal(&prev_word, short_scale).is_some() && val == Some(1.0) {
            val = state.prev_val;
        }

        // "twenty two", "fifty six", and smaller values after a multiplier
        let prev_is_sum = lexicon.is_sum_prefix(&prev_word);
        let should_sum = (prev_is_sum && truthy(val) && val.map_or(false, |v| v < 10.0))
            || (prev_is_sum
                && truthy(val)
                && val.map_or(false, |v| v < 100.0)
                && state.prev_val.map_or(false, |p| p >= 100.0))
            || (prev_is_scale
                && match (val, state.prev_val) {
                    (Some(v), Some(p)) => v < p,
                    _ => false,
                });
        if should_sum {
            val = Some(state.prev_val.unwrap_or(0.0) + val.unwrap_or(0.0));
        }

        // "two hundred", "five thousand"
        if word_is_scale {
            if !truthy(state.prev_val) {
                state.prev_val = Some(1.0);
            }
            val = Some(state.prev_val.unwrap_or(1.0) * val.unwrap_or(0.0));
        }

        // "пара сотень" (a pair of hundreds), "дві сотні" (two hundreds)
        if lexicon.is_pair_word(&prev_word) && current_val != Some(1000.0) {
            val = val.map(|v| v * 2.0);
        }
        if state.prev_val.map_or(false, |p| lexicon.is_cardinal_value(p))
            && current_val == Some(100.0)
        {
            val = Some(state.prev_val.unwrap_or(0.0) * 100.0);
        }

        // "half cup"
        if val.is_none() {
            if let Some(f) = lexicon.fraction(&word, &word, short_scale) {
                val = Some(f);
                current_val = val;
            }
        }

        // "2 fifths"
        if !ordinals && !next_word.is_empty() {
            if let Some(next_val) = lexicon.fraction(&next_word, &word, short_scale) {
                if next_val != 0.0 {
                    if !truthy(val) {
                        val = Some(1.0);
                    }
                    val = val.map(|v| v * next_val);
                    if let Some(next_token) = tokens.get(idx + 1) {
                        state.number_words.push(next_token.clone());
                    }
                    skip_next = true;
                }
            }
        }

        // "три пари пива" (three pairs of beer)
        if lexicon.is_pair_word(&word) {
            val = match state.prev_val {
                Some(p) if p != 0.0 => Some(val.unwrap_or(1.0) * p),
                _ => Some(2.0),
            };
        }

        if truthy(val) && !prev_word.is_empty() && lexicon.is_negative(&prev_word) {
            val = val.map(|v| -v);
        }

        if !truthy(val) {
            // literal fractions, "2/3"
            if let Some(f) = parse_fraction_literal(&word) {
                val = Some(f);
            }
        } else {
            let without_dots: String = word.chars().filter(|&c| c != '.').collect();
            if prev_is_sum
                && !lexicon.is_sum_prefix(&word)
                && !is_digit_string(&without_dots)
                && !word_is_scale
                && current_val.map_or(false, |c| c >= 10.0)
            {
                // two sum words we cannot combine ("twenty thirty"): give
                // back the current token and report what we had
                state.number_words.pop();
                state.val = state.prev_val;
                break;
            }
            state.prev_val = val;
            if word_is_scale && lexicon.scale(&next_word, short_scale).is_none() {
                // A finished scale portion of a long number is set aside in
                // to_sum when every multiplier still ahead of us is smaller
                // than the current one; the scan then starts assembling the
                // next portion. "nine million nine hundred seven thousand"
                // parks 9000000, then 907000.
                let mut time_to_sum = true;
                for other in &tokens[idx + 1..] {
                    if let Some(other_scale) =
                        lexicon.scale(&other.word.to_lowercase(), short_scale)
                    {
                        if other_scale >= current_val.unwrap_or(0.0) {
                            time_to_sum = false;
                        } else {
                            continue;
                        }
                    }
                    if !time_to_sum {
                        break;
                    }
                }
                if time_to_sum {
                    state.to_sum.push(val.unwrap_or(0.0));
                    val = Some(0.0);
                    state.prev_val = Some(0.0);
                }
            }
        }
        state.val = val;
    }

    let total = state.val? + state.to_sum.iter().sum::<f64>();
    if state.number_words.is_empty() {
        return None;
    }
    Some(ReplaceableNumber {
        value: NumberValue::Number(total),
        tokens: state.number_words,
    })
}
