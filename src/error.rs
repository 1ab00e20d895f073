//! Error types for the extraction API
//!
//!     "No match" is never an error: extraction functions return Option or an
//!     empty Vec when an utterance contains nothing of interest. The error
//!     types here cover the two genuinely exceptional situations: asking for
//!     a locale the crate does not ship, and an utterance that names an
//!     impossible calendar date ("june 40") where silently guessing would be
//!     worse than failing.

use std::fmt;

/// Failure to resolve a language tag to a shipped locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// The tag was syntactically fine but no locale implements it.
    Unsupported { tag: String },
}

impl fmt::Display for LanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageError::Unsupported { tag } => {
                write!(f, "unsupported language tag: {:?}", tag)
            }
        }
    }
}

impl std::error::Error for LanguageError {}

/// Failure while resolving an explicit date reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    /// The utterance named a month/day/year combination that does not exist
    /// on the calendar, e.g. "february 30 2024".
    InvalidDate { reference: String },
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate { reference } => {
                write!(f, "utterance names an impossible date: {:?}", reference)
            }
        }
    }
}

impl std::error::Error for DateTimeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_offending_input() {
        let err = LanguageError::Unsupported {
            tag: "tlh".to_string(),
        };
        assert!(err.to_string().contains("tlh"));

        let err = DateTimeError::InvalidDate {
            reference: "february 30".to_string(),
        };
        assert!(err.to_string().contains("february 30"));
    }
}
