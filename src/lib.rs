//! # parlance
//!
//! Extraction of numbers, durations and datetimes from natural-language
//! utterances, in several languages.
//!
//! The crate answers questions like "what number does 'two hundred and fifty
//! thousand' mean?" or "when is 'next friday at half past eight'?". Every
//! operation is dispatched through [`Language`], which resolves a BCP-47-ish
//! tag to a locale implementation:
//!
//! - numbers: cardinal words, ordinals, fractions, decimals, digit strings,
//!   short and long scale
//! - durations: "3 days 8 hours 10 minutes", returning what was left of the
//!   utterance alongside the value
//! - datetimes: relative offsets ("in 5 days"), weekday references ("next
//!   friday"), explicit dates ("june 5 2027") and times ("half past eight"),
//!   resolved against an anchor instant
//!
//! Layout
//!
//! The word scanners are shared, table-driven state machines (src/scan);
//! each locale under src/lang provides the lexicon tables and, where the
//! language's grammar genuinely differs (German), its own scanner variant.
//! Datetime extraction is a two-pass scan over a word buffer (src/datetime)
//! with locale-specific keyword rules.

#![allow(rustdoc::invalid_html_tags)]

pub mod datetime;
pub mod duration;
pub mod error;
pub mod lang;
pub mod lexicon;
pub mod scan;
pub mod tokenize;

pub use error::{DateTimeError, LanguageError};
pub use lang::Language;
pub use scan::{NumberOptions, ReplaceableNumber};
pub use tokenize::Token;
