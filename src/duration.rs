//! Duration extraction engine
//!
//!     Duration parsing is regex-driven: the locale front-end first
//!     substitutes spoken numbers with digits ("nine and a half days" becomes
//!     "9.5 days"), then every unit pattern sweeps the text, accumulating
//!     value * unit-seconds and deleting what it matched. Whatever survives
//!     is returned as the leftover utterance.

use chrono::Duration;
use regex::Regex;

/// Compiled unit patterns of one locale.
///
/// Each pattern must expose a `value` capture group holding the digits
/// (decimal comma allowed); `seconds` is the length of one unit.
pub struct DurationRules {
    pub units: Vec<(Regex, f64)>,
    /// Drop bare digit tokens from the leftover text (Ukrainian keeps
    /// stray converted numerals out of the remainder this way).
    pub strip_digit_tokens: bool,
}

impl DurationRules {
    /// Sweep `text` (already digit-substituted) for duration phrases.
    ///
    /// Returns the summed duration, or None when no unit matched, along
    /// with the leftover text with whitespace collapsed.
    pub fn extract(&self, text: &str) -> (Option<Duration>, String) {
        let mut total_seconds = 0.0f64;
        let mut matched = false;
        let mut remaining = text.to_string();

        for (pattern, unit_seconds) in &self.units {
            let replaced = pattern.replace_all(&remaining, |caps: &regex::Captures| {
                if let Some(value) = caps.name("value") {
                    if let Ok(v) = value.as_str().replace(',', ".").parse::<f64>() {
                        total_seconds += v * unit_seconds;
                        matched = true;
                    }
                }
                String::new()
            });
            remaining = replaced.into_owned();
        }

        let mut leftover_words: Vec<&str> = remaining.split_whitespace().collect();
        if self.strip_digit_tokens {
            leftover_words.retain(|w| !w.chars().all(|c| c.is_ascii_digit()));
        }
        let leftover = leftover_words.join(" ");

        let duration = if matched && total_seconds != 0.0 {
            Some(Duration::milliseconds((total_seconds * 1000.0).round() as i64))
        } else {
            None
        };
        (duration, leftover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static RULES: Lazy<DurationRules> = Lazy::new(|| DurationRules {
        units: vec![
            (
                Regex::new(r"(?:^|\s)(?P<value>\d+(?:[.,]?\d+)?)(?:\s+|-)minutes?\b").unwrap(),
                60.0,
            ),
            (
                Regex::new(r"(?:^|\s)(?P<value>\d+(?:[.,]?\d+)?)(?:\s+|-)hours?\b").unwrap(),
                3600.0,
            ),
        ],
        strip_digit_tokens: false,
    });

    #[test]
    fn test_units_accumulate() {
        let (duration, leftover) = RULES.extract("wait 2 hours and 30 minutes please");
        assert_eq!(duration, Some(Duration::seconds(2 * 3600 + 30 * 60)));
        assert_eq!(leftover, "wait and please");
    }

    #[test]
    fn test_no_match_returns_none_and_text() {
        let (duration, leftover) = RULES.extract("no units here");
        assert_eq!(duration, None);
        assert_eq!(leftover, "no units here");
    }

    #[test]
    fn test_fractional_and_comma_values() {
        let (duration, _) = RULES.extract("9,5 hours");
        assert_eq!(duration, Some(Duration::milliseconds(34_200_000)));
    }
}
