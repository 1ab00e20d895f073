//! Utterance tokenization
//!
//!     The scanners all operate on a flat list of word tokens. Tokenization
//!     keeps digits together with their internal separators ("1.5", "7,5",
//!     "3:45", "2/3" and trailing-dot ordinals like "31." stay one token),
//!     keeps apostrophes inside words ("o'clock", "п'ять"), and splits
//!     everything else on whitespace and punctuation. Each token remembers
//!     its position so consumed spans can be masked without disturbing the
//!     indices of later tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:[.,:/]\d+)*\.?|[\p{L}']+|\S").unwrap());

/// One word of an utterance and its position in the token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub word: String,
    pub index: usize,
}

impl Token {
    pub fn new(word: impl Into<String>, index: usize) -> Self {
        Token {
            word: word.into(),
            index,
        }
    }
}

/// Split an utterance into word tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    WORD.find_iter(text)
        .enumerate()
        .map(|(index, m)| Token::new(m.as_str(), index))
        .collect()
}

/// Split a token slice three ways around the single token matching `pred`.
///
/// Returns None when the predicate matches zero tokens, more than one token,
/// or a token at either edge (a marker needs material on both sides).
pub fn partition_once<F>(tokens: &[Token], pred: F) -> Option<(&[Token], &Token, &[Token])>
where
    F: Fn(&Token) -> bool,
{
    let mut found = None;
    for (i, token) in tokens.iter().enumerate() {
        if pred(token) {
            if found.is_some() {
                return None;
            }
            found = Some(i);
        }
    }
    let i = found?;
    if i == 0 || i + 1 == tokens.len() {
        return None;
    }
    Some((&tokens[..i], &tokens[i], &tokens[i + 1..]))
}

/// Parse a digit string as a number.
///
/// Deliberately stricter than `str::parse::<f64>`: words like "inf" must not
/// count, and a trailing dot marks an ordinal ("31."), not a decimal.
pub fn parse_numeric(word: &str) -> Option<f64> {
    if word.is_empty() || word.ends_with('.') {
        return None;
    }
    if !word
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
    {
        return None;
    }
    if !word.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    word.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an "a/b" literal fraction. Both sides must be plain integers.
pub fn parse_fraction_literal(word: &str) -> Option<f64> {
    let (num, den) = word.split_once('/')?;
    if num.is_empty() || den.is_empty() {
        return None;
    }
    if !num.chars().all(|c| c.is_ascii_digit()) || !den.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

/// True when the word is all ASCII digits.
pub fn is_digit_string(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_numeric_separators() {
        let words: Vec<String> = tokenize("wake me in 391.6 seconds at 3:45")
            .into_iter()
            .map(|t| t.word)
            .collect();
        assert_eq!(words, ["wake", "me", "in", "391.6", "seconds", "at", "3:45"]);
    }

    #[test]
    fn test_tokenize_trailing_dot_ordinal() {
        let tokens = tokenize("am 31. mai");
        assert_eq!(tokens[1].word, "31.");
        assert_eq!(tokens[1].index, 1);
    }

    #[test]
    fn test_tokenize_apostrophes_and_punctuation() {
        let words: Vec<String> = tokenize("at 8 o'clock, please")
            .into_iter()
            .map(|t| t.word)
            .collect();
        assert_eq!(words, ["at", "8", "o'clock", ",", "please"]);
    }

    #[test]
    fn test_partition_once_requires_single_interior_marker() {
        let tokens = tokenize("two and three");
        let (left, marker, right) = partition_once(&tokens, |t| t.word == "and").unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(marker.word, "and");
        assert_eq!(right.len(), 1);

        let tokens = tokenize("and three");
        assert!(partition_once(&tokens, |t| t.word == "and").is_none());

        let tokens = tokenize("two and three and four");
        assert!(partition_once(&tokens, |t| t.word == "and").is_none());
    }

    #[test]
    fn test_parse_numeric_rejects_words_and_ordinals() {
        assert_eq!(parse_numeric("17"), Some(17.0));
        assert_eq!(parse_numeric("391.6"), Some(391.6));
        assert_eq!(parse_numeric("31."), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("nan"), None);
        assert_eq!(parse_numeric("-"), None);
    }

    #[test]
    fn test_parse_fraction_literal() {
        assert_eq!(parse_fraction_literal("3/4"), Some(0.75));
        assert_eq!(parse_fraction_literal("1/0"), None);
        assert_eq!(parse_fraction_literal("3/"), None);
        assert_eq!(parse_fraction_literal("a/b"), None);
    }
}
