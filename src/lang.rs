//! Locale registry and dispatch
//!
//!     A Language is resolved once from a BCP-47-ish tag ("en", "en-US",
//!     "de-de", "uk_UA"); only the primary subtag decides. Every extraction
//!     operation dispatches through here to the locale implementation.

use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveTime, TimeZone};

use crate::error::{DateTimeError, LanguageError};
use crate::scan::NumberOptions;

pub mod de;
pub mod en;
pub mod uk;

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    German,
    Ukrainian,
}

impl Language {
    /// Resolve a language tag. Case and region subtags are ignored.
    pub fn from_tag(tag: &str) -> Result<Language, LanguageError> {
        let primary = tag
            .trim()
            .to_lowercase()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_string();
        match primary.as_str() {
            "en" => Ok(Language::English),
            "de" => Ok(Language::German),
            "uk" => Ok(Language::Ukrainian),
            _ => Err(LanguageError::Unsupported {
                tag: tag.to_string(),
            }),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
            Language::Ukrainian => "uk",
        }
    }

    /// Earliest number of the utterance, or None when it has none.
    pub fn extract_number(&self, text: &str, options: NumberOptions) -> Option<f64> {
        match self {
            Language::English => en::extract_number(text, options),
            Language::German => de::extract_number(text, options),
            Language::Ukrainian => uk::extract_number(text, options),
        }
    }

    /// Every number of the utterance, in utterance order.
    pub fn extract_numbers(&self, text: &str, options: NumberOptions) -> Vec<f64> {
        match self {
            Language::English => en::extract_numbers(text, options),
            Language::German => de::extract_numbers(text, options),
            Language::Ukrainian => uk::extract_numbers(text, options),
        }
    }

    /// Value of a single fraction word ("half" is 0.5 in English).
    pub fn is_fractional(&self, word: &str, short_scale: bool) -> Option<f64> {
        match self {
            Language::English => en::is_fractional(word, short_scale),
            Language::German => de::is_fractional(word, short_scale),
            Language::Ukrainian => uk::is_fractional(word, short_scale),
        }
    }

    /// Value of a single ordinal word ("third" is 3).
    pub fn is_ordinal(&self, word: &str) -> Option<f64> {
        match self {
            Language::English => en::is_ordinal(word),
            Language::German => de::is_ordinal(word),
            Language::Ukrainian => uk::is_ordinal(word),
        }
    }

    /// Sum of the duration phrases of the utterance, with the leftover text.
    pub fn extract_duration(&self, text: &str) -> (Option<Duration>, String) {
        match self {
            Language::English => en::extract_duration(text),
            Language::German => de::extract_duration(text),
            Language::Ukrainian => uk::extract_duration(text),
        }
    }

    /// Resolve a spoken datetime reference against `anchor`.
    ///
    /// Ok(None) when the utterance has no datetime content; Err only for
    /// impossible explicit dates.
    pub fn extract_datetime<Tz: TimeZone>(
        &self,
        text: &str,
        anchor: &DateTime<Tz>,
        default_time: Option<NaiveTime>,
    ) -> Result<Option<(DateTime<Tz>, String)>, DateTimeError> {
        match self {
            Language::English => en::extract_datetime(text, anchor, default_time),
            Language::German => de::extract_datetime(text, anchor, default_time),
            Language::Ukrainian => uk::extract_datetime(text, anchor, default_time),
        }
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_tag(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_resolution() {
        assert_eq!(Language::from_tag("en").unwrap(), Language::English);
        assert_eq!(Language::from_tag("en-US").unwrap(), Language::English);
        assert_eq!(Language::from_tag("de-de").unwrap(), Language::German);
        assert_eq!(Language::from_tag("uk_UA").unwrap(), Language::Ukrainian);
        assert!(Language::from_tag("tlh").is_err());
        assert!(Language::from_tag("").is_err());
    }

    #[test]
    fn test_from_str_round_trip() {
        let lang: Language = "uk".parse().unwrap();
        assert_eq!(lang.code(), "uk");
    }
}
