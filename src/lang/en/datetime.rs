//! English datetime extraction
//!
//!     Date pass: today/tomorrow/yesterday and their day-before/day-after
//!     compounds, "N days/weeks/months/years" offsets (plus decade, century
//!     and millennium multiples), weekday names with next/last, explicit
//!     month + day [+ year] dates, and "from/after" re-anchoring. Time pass:
//!     named times of day, "half past"/"quarter to", colon times, am/pm,
//!     o'clock, military digits and relative "in N hours/minutes/seconds".
//!     An hour with no am/pm marker resolves against the anchor clock: the
//!     next occurrence of that hour wins.

use chrono::{DateTime, NaiveTime, TimeZone, Timelike};

use crate::datetime::{days_until_weekday, resolve, DateTimeAccumulator, ExplicitDate, WordBuffer};
use crate::error::DateTimeError;
use crate::lang::en::lexicon::LEXICON;
use crate::lexicon::NumberLexicon;
use crate::tokenize::parse_numeric;

const MARKERS: &[&str] = &[
    "in", "on", "at", "by", "this", "around", "for", "of", "within",
];
const DAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];
const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];
const MONTHS_SHORT: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];
const AM_WORDS: &[&str] = &["am", "a.m", "morning"];
const PM_WORDS: &[&str] = &["pm", "p.m", "afternoon", "evening", "night", "tonight"];

fn number_of(word: &str) -> Option<f64> {
    parse_numeric(word).or_else(|| LEXICON.cardinal(word))
}

fn starts_with_digit(word: &str) -> bool {
    word.chars().next().map_or(false, |c| c.is_ascii_digit())
}

fn leading_digits(word: &str) -> Option<i64> {
    let digits: String = word.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn parse_year(word: &str) -> Option<i32> {
    if word.len() == 4 && word.chars().all(|c| c.is_ascii_digit()) {
        word.parse().ok()
    } else {
        None
    }
}

fn is_month(word: &str) -> Option<usize> {
    MONTHS
        .iter()
        .position(|&m| m == word)
        .or_else(|| MONTHS_SHORT.iter().position(|&m| m == word))
}

fn suffix_ordinal_value(word: &str) -> Option<f64> {
    if starts_with_digit(word) {
        LEXICON.ordinal(word, true)
    } else {
        None
    }
}

/// Lowercase, strip question marks and commas, and turn ordinals into day
/// numbers. Named ordinals ("third") only convert next to a month name, so
/// "wait a second" keeps its words; digit ordinals ("21st") always convert.
fn clean_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase().replace('?', "").replace(',', "");
    let mut words: Vec<String> = lowered.split_whitespace().map(str::to_string).collect();
    let count = words.len();
    for i in 0..count {
        if let Some(v) = suffix_ordinal_value(&words[i]) {
            words[i] = format!("{}", v as i64);
            continue;
        }
        if starts_with_digit(&words[i]) {
            continue;
        }
        if let Some(v) = LEXICON.ordinal(&words[i], true) {
            let prev = if i > 0 { words[i - 1].as_str() } else { "" };
            let next = words.get(i + 1).map(String::as_str).unwrap_or("");
            let next_next = words.get(i + 2).map(String::as_str).unwrap_or("");
            let near_month = is_month(prev).is_some()
                || is_month(next).is_some()
                || (next == "of" && is_month(next_next).is_some());
            if near_month {
                words[i] = format!("{}", v as i64);
            }
        }
    }
    words
}

pub fn extract_datetime<Tz: TimeZone>(
    text: &str,
    anchor: &DateTime<Tz>,
    default_time: Option<NaiveTime>,
) -> Result<Option<(DateTime<Tz>, String)>, DateTimeError> {
    if text.is_empty() {
        return Ok(None);
    }

    let mut buffer = WordBuffer::new(clean_words(text));
    let mut acc = DateTimeAccumulator::default();
    let mut from_flag = false;

    let mut followups: Vec<&str> = Vec::new();
    followups.extend_from_slice(DAYS);
    followups.extend_from_slice(MONTHS);
    followups.extend_from_slice(MONTHS_SHORT);
    followups.extend_from_slice(&["today", "tomorrow", "yesterday", "next", "last", "now"]);

    // date pass
    for idx in 0..buffer.len() {
        let word = buffer.get(idx).to_string();
        if word.is_empty() {
            continue;
        }
        let word_prev = buffer.get_rel(idx, -1).to_string();
        let word_next = buffer.get_rel(idx, 1).to_string();
        let word_next_next = buffer.get_rel(idx, 2).to_string();

        let mut start = idx as isize;
        let mut used = 0usize;

        if word == "today" && !from_flag {
            acc.day_offset = 0.0;
            used += 1;
        } else if word == "day" && word_next == "after" && word_next_next == "tomorrow" {
            acc.day_offset = 2.0;
            used += 3;
        } else if word == "day" && word_next == "before" && word_next_next == "yesterday" {
            acc.day_offset = -2.0;
            used += 3;
        } else if word == "tomorrow" && !from_flag {
            acc.day_offset = 1.0;
            used += 1;
        } else if word == "yesterday" && !from_flag {
            acc.day_offset = -1.0;
            used += 1;
        } else if matches!(word.as_str(), "day" | "days") {
            if let Some(num) = number_of(&word_prev) {
                acc.day_offset += num;
                start -= 1;
                used = 2;
            }
        } else if matches!(word.as_str(), "week" | "weeks") && !from_flag {
            if let Some(num) = number_of(&word_prev) {
                acc.day_offset += num * 7.0;
                start -= 1;
                used = 2;
            } else if word_prev == "next" {
                acc.day_offset = 7.0;
                start -= 1;
                used = 2;
            } else if word_prev == "last" {
                acc.day_offset = -7.0;
                start -= 1;
                used = 2;
            }
        } else if matches!(word.as_str(), "month" | "months") && !from_flag {
            if let Some(num) = number_of(&word_prev) {
                acc.month_offset = num as i32;
                start -= 1;
                used = 2;
            } else if word_prev == "next" {
                acc.month_offset = 1;
                start -= 1;
                used = 2;
            } else if word_prev == "last" {
                acc.month_offset = -1;
                start -= 1;
                used = 2;
            }
        } else if matches!(word.as_str(), "year" | "years") && !from_flag {
            if let Some(num) = number_of(&word_prev) {
                acc.year_offset = num as i32;
                start -= 1;
                used = 2;
            } else if word_prev == "next" {
                acc.year_offset = 1;
                start -= 1;
                used = 2;
            } else if word_prev == "last" {
                acc.year_offset = -1;
                start -= 1;
                used = 2;
            }
        } else if matches!(word.as_str(), "decade" | "decades") && !from_flag {
            if let Some(num) = number_of(&word_prev) {
                acc.year_offset = (num * 10.0) as i32;
                start -= 1;
                used = 2;
            } else if word_prev == "next" {
                acc.year_offset = 10;
                start -= 1;
                used = 2;
            } else if word_prev == "last" {
                acc.year_offset = -10;
                start -= 1;
                used = 2;
            }
        } else if matches!(word.as_str(), "century" | "centuries") && !from_flag {
            if let Some(num) = number_of(&word_prev) {
                acc.year_offset = (num * 100.0) as i32;
                start -= 1;
                used = 2;
            }
        } else if matches!(word.as_str(), "millennium" | "millenniums" | "millennia") && !from_flag
        {
            if let Some(num) = number_of(&word_prev) {
                acc.year_offset = (num * 1000.0) as i32;
                start -= 1;
                used = 2;
            }
        } else if DAYS.contains(&word.as_str()) && !from_flag {
            let d = DAYS.iter().position(|&x| x == word).unwrap_or(0) as u32;
            acc.day_offset = days_until_weekday(anchor, d);
            used = 1;
            if word_prev == "next" {
                acc.day_offset += 7.0;
                used += 1;
                start -= 1;
            } else if word_prev == "last" {
                acc.day_offset -= 7.0;
                used += 1;
                start -= 1;
            }
        } else if let Some(m) = is_month(&word) {
            // "may" is also a modal verb; only read it as a month next to
            // a day or year number
            let digit_neighbor =
                starts_with_digit(&word_prev) || starts_with_digit(&word_next);
            if (word != "may" || digit_neighbor)
                && (MONTHS.contains(&word.as_str()) || !from_flag)
            {
                used += 1;
                let mut day: Option<u32> = None;
                let mut year: Option<i32> = None;
                if starts_with_digit(&word_prev) && parse_year(&word_prev).is_none() {
                    day = leading_digits(&word_prev).map(|d| d as u32);
                    start -= 1;
                    used += 1;
                    if let Some(y) = parse_year(&word_next) {
                        year = Some(y);
                        used += 1;
                    }
                } else if starts_with_digit(&word_next) {
                    if let Some(y) = parse_year(&word_next) {
                        // "january 2022": a four-digit number is the year
                        year = Some(y);
                        used += 1;
                    } else {
                        day = leading_digits(&word_next).map(|d| d as u32);
                        used += 1;
                        if let Some(y) = parse_year(&word_next_next) {
                            year = Some(y);
                            used += 1;
                        }
                    }
                }
                acc.explicit = Some(ExplicitDate {
                    month: m as u32 + 1,
                    day: day.unwrap_or(1),
                    year,
                });
            }
        }

        // "5 days from tomorrow", "2 weeks after friday"
        if matches!(word.as_str(), "from" | "after") && followups.contains(&word_next.as_str()) {
            used = 2;
            from_flag = true;
            if word_next == "tomorrow" {
                acc.day_offset += 1.0;
            } else if word_next == "yesterday" {
                acc.day_offset -= 1.0;
            } else if DAYS.contains(&word_next.as_str()) {
                let d = DAYS.iter().position(|&x| x == word_next).unwrap_or(0) as u32;
                acc.day_offset += days_until_weekday(anchor, d);
            } else if DAYS.contains(&word_next_next.as_str()) {
                let d = DAYS.iter().position(|&x| x == word_next_next).unwrap_or(0) as u32;
                let mut tmp_offset = days_until_weekday(anchor, d);
                used = 3;
                if word_next == "next" {
                    tmp_offset += 7.0;
                } else if word_next == "last" {
                    tmp_offset -= 7.0;
                }
                acc.day_offset += tmp_offset;
            }
        }

        if used > 0 {
            if start - 1 >= 0 && buffer.get((start - 1) as usize) == "this" {
                start -= 1;
                used += 1;
            }
            for i in 0..used {
                let target = start + i as isize;
                if target >= 0 {
                    buffer.consume(target as usize);
                }
            }
            if start - 1 >= 0 && MARKERS.contains(&buffer.get((start - 1) as usize)) {
                buffer.consume((start - 1) as usize);
            }
            acc.found = true;
            acc.day_specified = true;
        }
    }

    // time pass
    let anchor_hour = anchor.naive_local().hour() as i64;
    for idx in 0..buffer.len() {
        let word = buffer.get(idx).to_string();
        if word.is_empty() {
            continue;
        }
        let word_prev_prev = buffer.get_rel(idx, -2).to_string();
        let word_prev = buffer.get_rel(idx, -1).to_string();
        let word_next = buffer.get_rel(idx, 1).to_string();
        let word_next_next = buffer.get_rel(idx, 2).to_string();
        let word_next_next_next = buffer.get_rel(idx, 3).to_string();

        let mut used = 0usize;

        if word == "noon" {
            acc.hr_abs = Some(12);
            used += 1;
        } else if word == "midnight" {
            acc.hr_abs = Some(0);
            used += 1;
        } else if word == "morning" {
            if acc.hr_abs.map_or(true, |h| h == 0) {
                acc.hr_abs = Some(8);
            }
            used += 1;
        } else if word == "afternoon" {
            if acc.hr_abs.map_or(true, |h| h == 0) {
                acc.hr_abs = Some(15);
            }
            used += 1;
        } else if word == "evening" {
            if acc.hr_abs.map_or(true, |h| h == 0) {
                acc.hr_abs = Some(19);
            }
            used += 1;
        } else if matches!(word.as_str(), "night" | "tonight") {
            if acc.hr_abs.map_or(true, |h| h == 0) {
                acc.hr_abs = Some(22);
            }
            used += 1;
        } else if matches!(word.as_str(), "hour" | "hours")
            && (MARKERS.contains(&word_prev.as_str()) || MARKERS.contains(&word_prev_prev.as_str()))
        {
            // "in an hour", "within the hour"
            acc.min_offset = 60.0;
            if idx > 0 {
                buffer.consume(idx - 1);
            }
            used += 1;
            acc.hr_abs = Some(-1);
            acc.min_abs = Some(-1);
        } else if matches!(word.as_str(), "minute" | "minutes")
            && (MARKERS.contains(&word_prev.as_str()) || MARKERS.contains(&word_prev_prev.as_str()))
        {
            acc.min_offset = 1.0;
            if idx > 0 {
                buffer.consume(idx - 1);
            }
            used += 1;
            acc.hr_abs = Some(-1);
            acc.min_abs = Some(-1);
        } else if matches!(word.as_str(), "second" | "seconds")
            && (MARKERS.contains(&word_prev.as_str()) || MARKERS.contains(&word_prev_prev.as_str()))
        {
            acc.sec_offset = 1.0;
            if idx > 0 {
                buffer.consume(idx - 1);
            }
            used += 1;
            acc.hr_abs = Some(-1);
            acc.min_abs = Some(-1);
        } else if starts_with_digit(&word) {
            let mut is_time = true;
            let mut military = false;
            let mut str_hh = String::new();
            let mut str_mm = String::new();
            let mut qualifier = "";
            let mut remainder = String::new();

            if word.contains(':') {
                let chars: Vec<char> = word.chars().collect();
                let mut stage = 0;
                let mut i = 0;
                while i < chars.len() {
                    match stage {
                        0 => {
                            if chars[i].is_ascii_digit() {
                                str_hh.push(chars[i]);
                                i += 1;
                            } else if chars[i] == ':' {
                                stage = 1;
                                i += 1;
                            } else {
                                stage = 2;
                            }
                        }
                        1 => {
                            if chars[i].is_ascii_digit() {
                                str_mm.push(chars[i]);
                                i += 1;
                            } else {
                                stage = 2;
                            }
                        }
                        _ => {
                            remainder = chars[i..].iter().filter(|&&c| c != '.').collect();
                            break;
                        }
                    }
                }
                match remainder.as_str() {
                    "pm" => qualifier = "pm",
                    "am" => qualifier = "am",
                    _ => {
                        let next_clean = word_next.replace('.', "");
                        if PM_WORDS.contains(&next_clean.as_str()) {
                            qualifier = "pm";
                            used += 1;
                        } else if AM_WORDS.contains(&next_clean.as_str()) {
                            qualifier = "am";
                            used += 1;
                        }
                    }
                }
            } else {
                let mut str_num = String::new();
                for c in word.chars() {
                    if c.is_ascii_digit() {
                        str_num.push(c);
                    } else {
                        remainder.push(c);
                    }
                }
                let next_clean = word_next.replace('.', "");

                if remainder == "pm" || next_clean == "pm" {
                    str_hh = str_num;
                    qualifier = "pm";
                    used = if remainder == "pm" { 0 } else { 1 };
                } else if remainder == "am" || next_clean == "am" {
                    str_hh = str_num;
                    qualifier = "am";
                    used = if remainder == "am" { 0 } else { 1 };
                } else if matches!(word_next.as_str(), "hour" | "hours") && str_num.len() <= 2 {
                    // "in 2 hours"; three or more digits is military time
                    acc.hr_offset = number_of(&word).unwrap_or(1.0);
                    used = 2;
                    is_time = false;
                    acc.hr_abs = Some(-1);
                    acc.min_abs = Some(-1);
                } else if matches!(word_next.as_str(), "minute" | "minutes") {
                    acc.min_offset = number_of(&word).unwrap_or(1.0);
                    used = 2;
                    is_time = false;
                    acc.hr_abs = Some(-1);
                    acc.min_abs = Some(-1);
                } else if matches!(word_next.as_str(), "second" | "seconds") {
                    acc.sec_offset = number_of(&word).unwrap_or(1.0);
                    used = 2;
                    is_time = false;
                    acc.hr_abs = Some(-1);
                    acc.min_abs = Some(-1);
                } else if matches!(word_next.as_str(), "o'clock" | "oclock") {
                    str_hh = str_num;
                    used += 1;
                } else if word_prev == "past" {
                    // "half past 8", "quarter past 8"
                    str_hh = str_num;
                    if word_prev_prev == "half" {
                        str_mm = "30".to_string();
                    } else if word_prev_prev == "quarter" {
                        str_mm = "15".to_string();
                    }
                    if idx > 0 {
                        buffer.consume(idx - 1);
                    }
                    if idx > 1 && matches!(word_prev_prev.as_str(), "half" | "quarter") {
                        buffer.consume(idx - 2);
                    }
                } else if word_prev == "to" && word_prev_prev == "quarter" {
                    // "quarter to 9" is 8:45
                    let hour = leading_digits(&str_num).unwrap_or(1);
                    str_hh = format!("{}", hour - 1);
                    str_mm = "45".to_string();
                    if idx > 0 {
                        buffer.consume(idx - 1);
                    }
                    if idx > 1 {
                        buffer.consume(idx - 2);
                    }
                } else if remainder.is_empty() && (str_num.len() == 3 || str_num.len() == 4) {
                    // military time, "2300 hours" without the unit
                    let split = str_num.len() - 2;
                    str_hh = str_num[..split].to_string();
                    str_mm = str_num[split..].to_string();
                    military = true;
                    if matches!(word_next.as_str(), "hour" | "hours") {
                        used += 1;
                    }
                } else if AM_WORDS.contains(&next_clean.as_str()) {
                    str_hh = str_num;
                    qualifier = "am";
                    used += 1;
                } else if PM_WORDS.contains(&next_clean.as_str()) {
                    str_hh = str_num;
                    qualifier = "pm";
                    used += 1;
                } else if word_next == "in"
                    && word_next_next == "the"
                    && AM_WORDS.contains(&word_next_next_next.as_str())
                {
                    str_hh = str_num;
                    qualifier = "am";
                    used += 3;
                } else if word_next == "in"
                    && word_next_next == "the"
                    && PM_WORDS.contains(&word_next_next_next.as_str())
                {
                    str_hh = str_num;
                    qualifier = "pm";
                    used += 3;
                } else if word_next == "at" && word_next_next == "night" {
                    str_hh = str_num;
                    qualifier = "pm";
                    used += 2;
                } else {
                    // a bare number with no time context is not a time
                    is_time = false;
                }
            }

            if is_time {
                let mut hh = leading_digits(&str_hh).unwrap_or(0);
                let mm = leading_digits(&str_mm).unwrap_or(0);
                if qualifier == "pm" {
                    if hh < 12 {
                        hh += 12;
                    }
                } else if qualifier == "am" {
                    if hh == 12 {
                        hh = 0;
                    }
                } else if !military && hh <= 12 && !acc.day_specified {
                    // no am/pm marker: the next occurrence of that hour wins
                    if anchor_hour < hh {
                        // still ahead of us today
                    } else if anchor_hour < hh + 12 {
                        hh += 12;
                    } else {
                        acc.day_offset += 1.0;
                    }
                }
                if hh > 24 || mm > 59 {
                    is_time = false;
                    used = 0;
                }
                if is_time {
                    acc.hr_abs = Some(hh as i32);
                    acc.min_abs = Some(mm as i32);
                    used += 1;
                }
            }
        }

        if used > 0 {
            buffer.consume_range(idx, used);
            if idx > 0 && MARKERS.contains(&word_prev.as_str()) {
                buffer.consume(idx - 1);
            }
            if idx > 1 && MARKERS.contains(&word_prev_prev.as_str()) {
                buffer.consume(idx - 2);
            }
            acc.found = true;
        }
    }

    if !acc.date_found() {
        return Ok(None);
    }

    let resolved = resolve(anchor, &acc, default_time)?;
    Ok(Some((resolved, buffer.leftover(&["and"]))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn anchor() -> DateTime<Utc> {
        // tuesday afternoon
        Utc.with_ymd_and_hms(2017, 6, 27, 13, 4, 0).unwrap()
    }

    #[test]
    fn test_tomorrow_resets_clock() {
        let (dt, leftover) = extract_datetime("set an alarm tomorrow", &anchor(), None)
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 28, 0, 0, 0).unwrap());
        assert_eq!(leftover, "set an alarm");
    }

    #[test]
    fn test_next_friday_with_default_time() {
        let default = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let (dt, _) = extract_datetime("next friday", &anchor(), Some(default))
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 7, 7, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_half_past_rolls_to_evening() {
        let (dt, _) = extract_datetime("remind me at half past 8", &anchor(), None)
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 27, 20, 30, 0).unwrap());
    }

    #[test]
    fn test_explicit_date_rolls_year() {
        let (dt, _) = extract_datetime("wake me on june 5th", &anchor(), None)
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2018, 6, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_in_five_minutes_is_relative() {
        let (dt, _) = extract_datetime("in 5 minutes", &anchor(), None)
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 27, 13, 9, 0).unwrap());
    }

    #[test]
    fn test_february_30_is_an_error() {
        assert!(extract_datetime("meet me on february 30", &anchor(), None).is_err());
    }

    #[test]
    fn test_no_datetime_returns_none() {
        assert!(extract_datetime("what is the weather", &anchor(), None)
            .unwrap()
            .is_none());
        assert!(extract_datetime("", &anchor(), None).unwrap().is_none());
    }
}
