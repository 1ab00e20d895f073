//! Datetime extraction infrastructure
//!
//!     Each locale scans an utterance in two passes: a date pass (today,
//!     weekday names, "in 5 days", explicit month/day dates) and a time pass
//!     (noon, "half past eight", colon times, "in 3 hours"). Both passes
//!     read and consume words out of a WordBuffer; what survives is the
//!     leftover text. The passes only accumulate offsets and absolute
//!     fields into a DateTimeAccumulator; resolve() then applies them to
//!     the anchor in a fixed order: explicit date, year offset, month
//!     offset, day offset, absolute time, relative time.

use chrono::{
    DateTime, Datelike, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike,
};

use crate::error::DateTimeError;

/// Mutable word list with a consumed mask.
///
/// Consumed positions read back as "" so neighbour lookups in the scan
/// loops see the same shape the text had, without destructive edits.
#[derive(Debug, Clone)]
pub struct WordBuffer {
    words: Vec<String>,
    consumed: Vec<bool>,
}

impl WordBuffer {
    pub fn new(words: Vec<String>) -> Self {
        let consumed = vec![false; words.len()];
        WordBuffer { words, consumed }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at `idx`, or "" when out of range or already consumed.
    pub fn get(&self, idx: usize) -> &str {
        if idx >= self.words.len() || self.consumed[idx] {
            ""
        } else {
            &self.words[idx]
        }
    }

    /// Signed-offset neighbour lookup; "" beyond either end.
    pub fn get_rel(&self, idx: usize, offset: isize) -> &str {
        let target = idx as isize + offset;
        if target < 0 {
            ""
        } else {
            self.get(target as usize)
        }
    }

    pub fn consume(&mut self, idx: usize) {
        if idx < self.words.len() {
            self.consumed[idx] = true;
        }
    }

    pub fn consume_range(&mut self, start: usize, count: usize) {
        for i in 0..count {
            self.consume(start + i);
        }
    }

    pub fn is_consumed(&self, idx: usize) -> bool {
        idx < self.words.len() && self.consumed[idx]
    }

    /// Rewrite a word in place (kept for scanners that canonicalize a word
    /// for their second pass).
    pub fn replace(&mut self, idx: usize, word: impl Into<String>) {
        if idx < self.words.len() {
            self.words[idx] = word.into();
            self.consumed[idx] = false;
        }
    }

    /// Unconsumed words joined by single spaces. A conjunction stranded
    /// between two consumed spans is swallowed too.
    pub fn leftover(&self, conjunctions: &[&str]) -> String {
        let mut keep: Vec<&str> = Vec::new();
        for idx in 0..self.words.len() {
            if self.consumed[idx] {
                continue;
            }
            let word = self.words[idx].as_str();
            if word.is_empty() {
                continue;
            }
            if conjunctions.contains(&word)
                && self.get_rel(idx, -1).is_empty()
                && self.get_rel(idx, 1).is_empty()
            {
                continue;
            }
            keep.push(word);
        }
        keep.join(" ")
    }
}

/// An explicit month/day[/year] reference from the utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplicitDate {
    pub month: u32,
    pub day: u32,
    pub year: Option<i32>,
}

/// Everything the two scan passes learned about the utterance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateTimeAccumulator {
    pub found: bool,
    pub day_specified: bool,
    pub explicit: Option<ExplicitDate>,
    pub year_offset: i32,
    pub month_offset: i32,
    pub day_offset: f64,
    /// Absolute hour; Some(-1) marks "a relative time phrase claimed the
    /// time slot", which suppresses both absolute time and default_time.
    pub hr_abs: Option<i32>,
    pub min_abs: Option<i32>,
    pub hr_offset: f64,
    pub min_offset: f64,
    pub sec_offset: f64,
}

impl DateTimeAccumulator {
    pub fn date_found(&self) -> bool {
        self.found
            || self.explicit.is_some()
            || self.year_offset != 0
            || self.month_offset != 0
            || self.hr_offset != 0.0
            || self.min_offset != 0.0
            || self.sec_offset != 0.0
            || self.hr_abs.is_some()
            || self.min_abs.is_some()
    }

    pub fn has_relative_time(&self) -> bool {
        self.hr_offset != 0.0 || self.min_offset != 0.0 || self.sec_offset != 0.0
    }
}

fn add_months_signed(naive: NaiveDateTime, months: i64) -> NaiveDateTime {
    let clamped = months.clamp(-(u32::MAX as i64), u32::MAX as i64);
    let shifted = if clamped >= 0 {
        naive.checked_add_months(Months::new(clamped as u32))
    } else {
        naive.checked_sub_months(Months::new(clamped.unsigned_abs() as u32))
    };
    shifted.unwrap_or(if months >= 0 {
        NaiveDateTime::MAX
    } else {
        NaiveDateTime::MIN
    })
}

fn millis(amount: f64) -> chrono::Duration {
    // the f64 -> i64 cast saturates at the integer range edges
    chrono::Duration::milliseconds((amount * 1000.0).round() as i64)
}

fn shift_saturating(naive: NaiveDateTime, shift: chrono::Duration) -> NaiveDateTime {
    naive.checked_add_signed(shift).unwrap_or({
        if shift > chrono::Duration::zero() {
            NaiveDateTime::MAX
        } else {
            NaiveDateTime::MIN
        }
    })
}

/// Apply the accumulated fields to the anchor.
///
/// The anchor's own clock time survives only when the utterance was purely
/// relative ("in half an hour"); any dated reference starts from midnight.
/// A bare time earlier than the anchor rolls forward one day unless a day
/// was named. Offsets that leave chrono's representable range saturate at
/// the range edge instead of overflowing. The anchor's zone is reattached
/// at the end; an utterance naming a nonexistent local instant is an
/// error, as is an impossible explicit date.
pub fn resolve<Tz: TimeZone>(
    anchor: &DateTime<Tz>,
    acc: &DateTimeAccumulator,
    default_time: Option<NaiveTime>,
) -> Result<DateTime<Tz>, DateTimeError> {
    let anchor_naive = anchor.naive_local();
    let mut naive = anchor_naive
        .with_nanosecond(0)
        .unwrap_or(anchor_naive);

    if let Some(explicit) = acc.explicit {
        let build = |year: i32| {
            NaiveDate::from_ymd_opt(year, explicit.month, explicit.day).ok_or_else(|| {
                DateTimeError::InvalidDate {
                    reference: format!(
                        "{:04}-{:02}-{:02}",
                        year, explicit.month, explicit.day
                    ),
                }
            })
        };
        let date = match explicit.year {
            Some(year) => build(year)?,
            None => {
                // the date has to lie ahead of the anchor; roll a year
                // when it already passed
                let this_year = build(anchor_naive.year())?;
                if anchor_naive.date() < this_year {
                    this_year
                } else {
                    build(anchor_naive.year() + 1)?
                }
            }
        };
        naive = date.and_hms_opt(0, 0, 0).ok_or(DateTimeError::InvalidDate {
            reference: date.to_string(),
        })?;
    } else if !acc.has_relative_time() {
        naive = naive.date().and_hms_opt(0, 0, 0).unwrap_or(naive);
    }

    let month_shift = acc.year_offset as i64 * 12 + acc.month_offset as i64;
    if month_shift != 0 {
        naive = add_months_signed(naive, month_shift);
    }
    if acc.day_offset != 0.0 {
        naive = shift_saturating(naive, millis(acc.day_offset * 86_400.0));
    }

    if acc.hr_abs != Some(-1) && acc.min_abs != Some(-1) {
        let (hr_abs, min_abs) = match (acc.hr_abs, acc.min_abs) {
            (None, None) => match default_time {
                Some(t) => (Some(t.hour() as i32), Some(t.minute() as i32)),
                None => (None, None),
            },
            pair => pair,
        };
        let h = hr_abs.unwrap_or(0).max(0);
        let m = min_abs.unwrap_or(0).max(0);
        naive = shift_saturating(
            naive,
            chrono::Duration::hours(h as i64) + chrono::Duration::minutes(m as i64),
        );
        if (h != 0 || m != 0) && acc.explicit.is_none() && !acc.day_specified && anchor_naive > naive
        {
            naive = shift_saturating(naive, chrono::Duration::days(1));
        }
    }

    if acc.hr_offset != 0.0 {
        naive = shift_saturating(naive, millis(acc.hr_offset * 3600.0));
    }
    if acc.min_offset != 0.0 {
        naive = shift_saturating(naive, millis(acc.min_offset * 60.0));
    }
    if acc.sec_offset != 0.0 {
        naive = shift_saturating(naive, millis(acc.sec_offset));
    }

    match anchor.timezone().from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(dt, _) => Ok(dt),
        LocalResult::None => Err(DateTimeError::InvalidDate {
            reference: naive.to_string(),
        }),
    }
}

/// Days until the named weekday (0 = Monday), always 0..=6 ahead.
pub fn days_until_weekday<Tz: TimeZone>(anchor: &DateTime<Tz>, weekday: u32) -> f64 {
    let today = anchor.weekday().num_days_from_monday() as i64;
    let mut offset = weekday as i64 - today;
    if offset < 0 {
        offset += 7;
    }
    offset as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 6, 27, 13, 4, 0).unwrap()
    }

    #[test]
    fn test_resolve_day_offset_resets_clock() {
        let acc = DateTimeAccumulator {
            found: true,
            day_offset: 1.0,
            ..Default::default()
        };
        let resolved = resolve(&anchor(), &acc, None).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2017, 6, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_resolve_relative_offset_keeps_clock() {
        let acc = DateTimeAccumulator {
            found: true,
            hr_offset: 0.5,
            hr_abs: Some(-1),
            min_abs: Some(-1),
            ..Default::default()
        };
        let resolved = resolve(&anchor(), &acc, None).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2017, 6, 27, 13, 34, 0).unwrap());
    }

    #[test]
    fn test_resolve_passed_time_rolls_forward() {
        let acc = DateTimeAccumulator {
            found: true,
            hr_abs: Some(9),
            min_abs: Some(0),
            ..Default::default()
        };
        let resolved = resolve(&anchor(), &acc, None).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2017, 6, 28, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_resolve_impossible_explicit_date_errors() {
        let acc = DateTimeAccumulator {
            explicit: Some(ExplicitDate {
                month: 6,
                day: 40,
                year: Some(2018),
            }),
            ..Default::default()
        };
        assert!(resolve(&anchor(), &acc, None).is_err());
    }

    #[test]
    fn test_resolve_yearless_date_rolls_year() {
        // anchor is june 27th; june 5th has passed
        let acc = DateTimeAccumulator {
            explicit: Some(ExplicitDate {
                month: 6,
                day: 5,
                year: None,
            }),
            ..Default::default()
        };
        let resolved = resolve(&anchor(), &acc, None).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2018, 6, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_resolve_saturates_on_huge_offsets() {
        let years = DateTimeAccumulator {
            found: true,
            year_offset: 200_000_000,
            ..Default::default()
        };
        assert!(resolve(&anchor(), &years, None).is_ok());

        let days = DateTimeAccumulator {
            found: true,
            day_offset: 99_999_999_999_999.0,
            ..Default::default()
        };
        assert!(resolve(&anchor(), &days, None).is_ok());

        let past = DateTimeAccumulator {
            found: true,
            day_offset: -99_999_999_999_999.0,
            ..Default::default()
        };
        assert!(resolve(&anchor(), &past, None).is_ok());
    }

    #[test]
    fn test_leftover_swallows_stranded_conjunction() {
        let mut buffer = WordBuffer::new(
            ["set", "alarm", "tomorrow", "and", "tuesday"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
        );
        buffer.consume(2);
        buffer.consume(4);
        assert_eq!(buffer.leftover(&["and"]), "set alarm");
    }
}
