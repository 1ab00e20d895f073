//! German datetime extraction
//!
//!     The utterance first has its spoken numbers substituted with digits
//!     (including clock values like "7:45" from "drei viertel acht"), then
//!     two passes walk the words: the date pass handles heute/morgen/
//!     übermorgen, weekday and month references and the tag/woche/monat/jahr
//!     offsets, the time pass handles mittag/mitternacht and friends, colon
//!     times, "N uhr" and the relative stunden/minuten/sekunden offsets.
//!     Whatever neither pass consumed is returned as leftover text.

use chrono::{DateTime, NaiveTime, TimeZone};

use crate::datetime::{days_until_weekday, resolve, DateTimeAccumulator, ExplicitDate, WordBuffer};
use crate::error::DateTimeError;
use crate::lang::de::{lexicon, scanner};

const MARKERS: &[&str] = &["in", "am", "gegen", "bis", "für"];
const DAYS: &[&str] = &[
    "montag",
    "dienstag",
    "mittwoch",
    "donnerstag",
    "freitag",
    "samstag",
    "sonntag",
];
const MONTHS: &[&str] = &[
    "januar",
    "februar",
    "märz",
    "april",
    "mai",
    "juni",
    "juli",
    "august",
    "september",
    "oktober",
    "november",
    "dezember",
];
const MONTHS_SHORT: &[&str] = &[
    "jan", "feb", "mär", "apr", "mai", "juni", "juli", "aug", "sept", "okt", "nov", "dez",
];
const TIME_QUALIFIERS: &[&str] = &[
    "früh",
    "morgens",
    "vormittag",
    "vormittags",
    "mittag",
    "mittags",
    "nachmittag",
    "nachmittags",
    "abend",
    "abends",
    "nacht",
    "nachts",
    "pm",
    "p.m.",
];
const EVENING_QUALIFIERS: &[&str] = &[
    "nachmittag",
    "nachmittags",
    "abend",
    "abends",
    "nacht",
    "nachts",
    "pm",
    "p.m.",
];

fn leading_digits(word: &str) -> Option<i64> {
    let digits: String = word.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn starts_with_digit(word: &str) -> bool {
    word.chars().next().map_or(false, |c| c.is_ascii_digit())
}

/// A trailing number only counts as a year when it is written with four
/// digits; "mai 8" reads as a time, not the year 8.
fn parse_year(word: &str) -> Option<i32> {
    if word.len() == 4 && word.chars().all(|c| c.is_ascii_digit()) {
        word.parse().ok()
    } else {
        None
    }
}

/// Substitute numbers, drop filler prepositions and articles, and turn
/// ordinal words into bare day numbers ("dritter" becomes "3").
fn clean_words(text: &str) -> Vec<String> {
    let converted = scanner::convert_words_to_numbers(text, false, true);
    let lowered = converted.to_lowercase().replace('?', "");
    let words: Vec<String> = lowered.split_whitespace().map(str::to_string).collect();
    let count = words.len();
    let mut kept: Vec<String> = Vec::with_capacity(count);
    for (i, word) in words.into_iter().enumerate() {
        // interior fillers drop out; the edges stay untouched
        if i > 0
            && i + 1 < count
            && matches!(word.as_str(), "der" | "den" | "an" | "am" | "auf" | "um")
        {
            continue;
        }
        kept.push(word);
    }
    for word in kept.iter_mut() {
        if let Some(v) = lexicon::ordinal_number(word) {
            *word = format!("{}", v as i64);
        }
    }
    kept
}

/// am/pm reading of the qualifier word that follows an hour.
fn qualifier_from(word: &str, hour: i64) -> Option<&'static str> {
    if word.starts_with("nachmittag") || word.starts_with("abend") {
        Some("pm")
    } else if word.starts_with("morgens") {
        Some("am")
    } else if word.starts_with("nacht") {
        // 8 through 12 at night are evening hours, smaller ones early morning
        Some(if (8..=12).contains(&hour) { "pm" } else { "am" })
    } else {
        None
    }
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
    followups.extend_from_slice(&[
        "heute", "morgen", "nächste", "nächster", "nächstes", "nächsten", "nächstem", "letzte",
        "letzter", "letztes", "letzten", "letztem", "jetzt",
    ]);

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

        if word == "heute" && !from_flag {
            acc.day_offset = 0.0;
            used += 1;
        } else if word == "morgen" && !from_flag && word_prev != "am" && !DAYS.contains(&word_prev.as_str()) {
            acc.day_offset = 1.0;
            used += 1;
        } else if word == "übermorgen" && !from_flag {
            acc.day_offset = 2.0;
            used += 1;
        } else if word.starts_with("tag") && word.chars().count() <= 5 {
            if let Some(num) = lexicon::number_value(&word_prev) {
                acc.day_offset += num;
                start -= 1;
                used = 2;
            }
        } else if word.starts_with("woche") && word.chars().count() <= 7 && !from_flag {
            if let Some(num) = lexicon::number_value(&word_prev) {
                acc.day_offset += num * 7.0;
                start -= 1;
                used = 2;
            } else if word_prev.starts_with("nächst") {
                acc.day_offset = 7.0;
                start -= 1;
                used = 2;
            } else if word_prev.starts_with("letzt") {
                acc.day_offset = -7.0;
                start -= 1;
                used = 2;
            }
        } else if word.starts_with("monat") && word.chars().count() <= 7 && !from_flag {
            if let Some(num) = lexicon::number_value(&word_prev) {
                acc.month_offset = num as i32;
                start -= 1;
                used = 2;
            } else if word_prev.starts_with("nächst") {
                acc.month_offset = 1;
                start -= 1;
                used = 2;
            } else if word_prev.starts_with("letzt") {
                acc.month_offset = -1;
                start -= 1;
                used = 2;
            }
        } else if word.starts_with("jahr") && word.chars().count() <= 6 && !from_flag {
            if let Some(num) = lexicon::number_value(&word_prev) {
                acc.year_offset = num as i32;
                start -= 1;
                used = 2;
            } else if word_prev.starts_with("nächst") {
                acc.year_offset = 1;
                start -= 1;
                used = 2;
            } else if word_prev.starts_with("letzt") {
                acc.year_offset = -1;
                start -= 1;
                used = 2;
            }
        } else if DAYS.contains(&word.as_str()) && !from_flag {
            let d = DAYS.iter().position(|&x| x == word).unwrap_or(0) as u32;
            acc.day_offset = days_until_weekday(anchor, d);
            used = 1;
            if word_next == "morgen" {
                // after a weekday, "morgen" means morning
                buffer.replace(idx + 1, "früh");
            }
            if word_prev.starts_with("nächst") {
                acc.day_offset += 7.0;
                used += 1;
                start -= 1;
            } else if word_prev.starts_with("letzt") {
                acc.day_offset -= 7.0;
                used += 1;
                start -= 1;
            }
        } else if MONTHS.contains(&word.as_str())
            || (MONTHS_SHORT.contains(&word.as_str()) && !from_flag)
        {
            let m = MONTHS
                .iter()
                .chain(MONTHS_SHORT.iter())
                .position(|&x| x == word)
                .unwrap_or(0)
                % 12;
            used += 1;
            let mut day: Option<u32> = None;
            let mut year: Option<i32> = None;
            if starts_with_digit(&word_prev) {
                day = leading_digits(&word_prev).map(|d| d as u32);
                start -= 1;
                used += 1;
                if let Some(y) = parse_year(&word_next) {
                    year = Some(y);
                    used += 1;
                }
            } else if starts_with_digit(&word_next) {
                day = leading_digits(&word_next).map(|d| d as u32);
                used += 1;
                if let Some(y) = parse_year(&word_next_next) {
                    year = Some(y);
                    used += 1;
                }
            }
            acc.explicit = Some(ExplicitDate {
                month: m as u32 + 1,
                day: day.unwrap_or(1),
                year,
            });
        }

        // "5 tage ab morgen", "2 wochen ab freitag"
        if matches!(word.as_str(), "von" | "nach" | "ab")
            && followups.contains(&word_next.as_str())
        {
            used = 2;
            from_flag = true;
            if word_next == "morgen" && word_prev != "am" && !DAYS.contains(&word_prev.as_str()) {
                acc.day_offset += 1.0;
            } else if DAYS.contains(&word_next.as_str()) {
                let d = DAYS.iter().position(|&x| x == word_next).unwrap_or(0) as u32;
                acc.day_offset += days_until_weekday(anchor, d);
                used = 2;
            } else if DAYS.contains(&word_next_next.as_str()) {
                let d = DAYS.iter().position(|&x| x == word_next_next).unwrap_or(0) as u32;
                let mut tmp_offset = days_until_weekday(anchor, d);
                used = 3;
                if word_next.starts_with("nächst") {
                    tmp_offset += 7.0;
                    used += 1;
                    start -= 1;
                } else if word_next.starts_with("letzt") {
                    tmp_offset -= 7.0;
                    used += 1;
                    start -= 1;
                }
                acc.day_offset += tmp_offset;
            }
        }

        if used > 0 {
            if start - 1 > 0 && buffer.get((start - 1) as usize).starts_with("diese") {
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
    for idx in 0..buffer.len() {
        let word = buffer.get(idx).to_string();
        if word.is_empty() {
            continue;
        }
        let word_prev_prev = buffer.get_rel(idx, -2).to_string();
        let word_prev = buffer.get_rel(idx, -1).to_string();
        let word_next = buffer.get_rel(idx, 1).to_string();
        let word_next_next = buffer.get_rel(idx, 2).to_string();

        let mut used = 0usize;

        if word.starts_with("mittag") {
            acc.hr_abs = Some(12);
            used += 1;
        } else if word.starts_with("mitternacht") {
            acc.hr_abs = Some(0);
            used += 1;
        } else if word == "morgens" || (word_prev == "am" && word == "morgen") || word == "früh" {
            if acc.hr_abs.map_or(true, |h| h == 0) {
                acc.hr_abs = Some(8);
            }
            used += 1;
        } else if word.starts_with("nachmittag") {
            if acc.hr_abs.map_or(true, |h| h == 0) {
                acc.hr_abs = Some(15);
            }
            used += 1;
        } else if word.starts_with("abend") {
            if acc.hr_abs.map_or(true, |h| h == 0) {
                acc.hr_abs = Some(19);
            }
            used += 1;
        } else if word.starts_with("nacht") {
            if acc.hr_abs.map_or(true, |h| h == 0) {
                acc.hr_abs = Some(23);
            }
            used += 1;
        } else if word.starts_with("stunde")
            && (MARKERS.contains(&word_prev.as_str()) || MARKERS.contains(&word_prev_prev.as_str()))
        {
            // "in einer stunde"
            acc.min_offset = 60.0;
            if MARKERS.contains(&word_prev_prev.as_str()) && idx > 1 {
                buffer.consume(idx - 2);
            }
            if idx > 0 {
                buffer.consume(idx - 1);
            }
            used += 1;
            acc.hr_abs = Some(-1);
            acc.min_abs = Some(-1);
        } else if starts_with_digit(&word) {
            let mut is_time = true;
            let mut str_hh = String::new();
            let mut str_mm = String::new();
            let mut qualifier = "";
            let mut remainder = String::new();

            if word.contains(':') {
                // "8:30 abends"
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
                if remainder.is_empty() {
                    let next_clean = word_next.replace('.', "");
                    if EVENING_QUALIFIERS.contains(&next_clean.as_str()) {
                        used += 1;
                        qualifier = "pm";
                    } else if TIME_QUALIFIERS.contains(&next_clean.as_str()) {
                        used += 1;
                        qualifier = "am";
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

                if remainder == "pm" || word_next == "pm" || remainder == "p.m." || word_next == "p.m." {
                    str_hh = str_num;
                    qualifier = "pm";
                    used = 1;
                } else if remainder == "am"
                    || word_next == "am"
                    || remainder == "a.m."
                    || word_next == "a.m."
                {
                    str_hh = str_num;
                    qualifier = "am";
                    used = 1;
                } else if word_next.starts_with("stunde") && word_next.chars().count() <= 7 {
                    // "in 3 stunden", "in 0.5 stunden"
                    acc.hr_offset = lexicon::number_value(&word).unwrap_or(1.0);
                    used = 2;
                    is_time = false;
                    acc.hr_abs = Some(-1);
                    acc.min_abs = Some(-1);
                } else if word_next.starts_with("minute") && word_next.chars().count() <= 7 {
                    acc.min_offset = lexicon::number_value(&word).unwrap_or(1.0);
                    used = 2;
                    is_time = false;
                    acc.hr_abs = Some(-1);
                    acc.min_abs = Some(-1);
                } else if word_next.starts_with("sekunde") && word_next.chars().count() <= 8 {
                    acc.sec_offset = lexicon::number_value(&word).unwrap_or(1.0);
                    used = 2;
                    is_time = false;
                    acc.hr_abs = Some(-1);
                    acc.min_abs = Some(-1);
                } else if word_next == "uhr" {
                    str_hh = word.clone();
                    used += 1;
                    is_time = true;
                    let hour = leading_digits(&word).unwrap_or(0);
                    if TIME_QUALIFIERS.contains(&word_next_next.as_str()) {
                        str_mm.clear();
                        if let Some(q) = qualifier_from(&word_next_next, hour) {
                            used += 1;
                            qualifier = q;
                        }
                    } else if crate::tokenize::parse_numeric(&word_next_next).is_some() {
                        str_mm = word_next_next.clone();
                        used += 1;
                    }
                } else if TIME_QUALIFIERS.contains(&word_next.as_str()) {
                    str_hh = word.clone();
                    str_mm = "0".to_string();
                    is_time = true;
                    let hour = leading_digits(&word).unwrap_or(0);
                    if let Some(q) = qualifier_from(&word_next, hour) {
                        used += 1;
                        qualifier = q;
                    }
                }
            }

            let mut hh = leading_digits(&str_hh).unwrap_or(0);
            let mm = leading_digits(&str_mm).unwrap_or(0);
            if !qualifier.is_empty() {
                let pm_marker = (0..buffer.len()).any(|i| {
                    let w = buffer.get(i);
                    w == "pm" || w == "p.m."
                });
                if hh <= 12 && qualifier == "pm" && !(hh == 12 && pm_marker) {
                    if hh == 12 {
                        // "zwölf uhr nachts" wraps to the start of the next day
                        hh = 0;
                        acc.day_offset += 1.0;
                    } else {
                        hh += 12;
                    }
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

        if used > 0 {
            buffer.consume_range(idx, used);
            if word_prev == "früh" && idx > 0 {
                acc.hr_offset = -1.0;
                buffer.consume(idx - 1);
            } else if word_prev == "spät" && idx > 0 {
                acc.hr_offset = 1.0;
                buffer.consume(idx - 1);
            }
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
    Ok(Some((resolved, buffer.leftover(&["und"]))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 6, 27, 13, 4, 0).unwrap()
    }

    #[test]
    fn test_clean_words_converts_numbers_and_ordinals() {
        assert_eq!(
            clean_words("am dritten mai um acht uhr"),
            vec!["am", "3", "mai", "8", "uhr"]
        );
    }

    #[test]
    fn test_evening_half_hour() {
        let (dt, leftover) = extract_datetime(
            "setze den frisörtermin auf halb neun abends",
            &anchor(),
            None,
        )
        .unwrap()
        .unwrap();
        assert_eq!((dt.hour(), dt.minute()), (20, 30));
        assert_eq!(leftover, "setze frisörtermin");
    }

    #[test]
    fn test_relative_half_hour_keeps_clock() {
        let (dt, _) = extract_datetime("in einer halben stunde", &anchor(), None)
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 27, 13, 34, 0).unwrap());
    }

    #[test]
    fn test_no_datetime_content() {
        let result = extract_datetime("wie ist das wetter", &anchor(), None).unwrap();
        assert!(result.is_none());
    }
}
