//! Ukrainian datetime extraction
//!
//!     The cleaner folds inflection away and rewrites spoken day ordinals
//!     ("двадцять третього" reads as day 23). The date pass handles "зараз",
//!     today/tomorrow/yesterday words, counted day/week/month/year offsets
//!     behind the prepositions "через" and "на", decade and century
//!     multiples, weekday and month names, and "до/по/з" re-anchoring. The
//!     time pass reads named times of day, "через годину/хвилину/секунду"
//!     offsets, colon times and bare hours qualified by morning, day,
//!     evening or night words. "наступний" (next) before a weekday means at
//!     least two days ahead.

use chrono::{DateTime, NaiveTime, TimeZone, Timelike};

use crate::datetime::{days_until_weekday, resolve, DateTimeAccumulator, ExplicitDate, WordBuffer};
use crate::error::DateTimeError;
use crate::lang::uk::lexicon;
use crate::lang::uk::morphology::{normalize_datetime_word, normalize_number_word};
use crate::lexicon::NumberLexicon;
use crate::tokenize::parse_numeric;

const MARKERS: &[&str] = &[
    "на", "у", "в", "о", "до", "це", "біля", "цей", "через", "після", "за", "той",
];
const DAYS: &[&str] = &[
    "понеділок",
    "вівторок",
    "середа",
    "четвер",
    "п'ятниця",
    "субота",
    "неділя",
];
const MONTHS_SHORT: &[&str] = &[
    "січ", "лют", "бер", "квіт", "трав", "червень", "лип", "серп", "верес", "жовт", "листоп",
    "груд",
];

const WORDS_NEXT: &[&str] = &[
    "майбутня",
    "майбутнє",
    "майбутній",
    "майбутньому",
    "майбутнім",
    "майбутньої",
    "майбутнього",
    "нова",
    "нове",
    "новий",
    "нового",
    "нової",
    "новим",
    "новою",
    "через",
    "наступна",
    "наступне",
    "наступний",
    "наступній",
    "наступному",
    "наступним",
    "наступною",
];
const WORDS_PREV: &[&str] = &[
    "попередня",
    "попередній",
    "попереднім",
    "попередньої",
    "попередню",
    "попереднього",
    "попередне",
    "тому",
    "минула",
    "минулий",
    "минуле",
    "минулу",
    "минулого",
    "минулій",
    "минулому",
    "минулої",
    "минулою",
    "минулим",
    "та",
    "той",
    "ті",
    "те",
    "того",
];
const WORDS_CURRENT: &[&str] = &[
    "теперішній",
    "теперішня",
    "теперішні",
    "теперішньому",
    "теперішньою",
    "теперішнім",
    "теперішнього",
    "теперішньої",
    "дана",
    "даний",
    "дане",
    "даним",
    "даною",
    "даного",
    "даної",
    "даному",
    "даній",
    "поточний",
    "поточна",
    "поточні",
    "поточне",
    "поточного",
    "поточної",
    "поточному",
    "поточній",
    "поточним",
    "поточною",
    "нинішній",
    "нинішня",
    "нинішнє",
    "нинішньому",
    "нинішнього",
    "нинішньої",
    "нинішнім",
    "нинішньою",
    "цей",
    "ця",
    "це",
    "цим",
    "цією",
    "цьому",
    "цій",
];
const WORDS_NOW: &[&str] = &["тепер", "зараз"];
const WORDS_MORNING: &[&str] = &["ранок", "зранку", "вранці", "ранку"];
const WORDS_DAYTIME: &[&str] = &["вдень", "опівдні"];
const WORDS_EVENING: &[&str] = &["вечер", "ввечері", "увечері", "вечором"];
const WORDS_NIGHT: &[&str] = &["ніч", "вночі"];
const YEAR_MULTIPLES: &[&str] = &[
    "десятиліття",
    "століття",
    "тисячоліття",
    "тисячоліть",
    "століть",
    "сторіччя",
    "сторіч",
];
const RECUR_MARKERS: &[&str] = &[
    "понеділок",
    "вівторок",
    "середа",
    "четвер",
    "п'ятниця",
    "субота",
    "неділя",
    "вихідні",
    "вікенд",
];

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

fn is_pm_qualifier(word: &str) -> bool {
    word == "дня"
        || word == "вечора"
        || WORDS_DAYTIME.contains(&word)
        || WORDS_EVENING.contains(&word)
        || WORDS_NIGHT.contains(&word)
}

fn is_am_qualifier(word: &str) -> bool {
    WORDS_MORNING.contains(&word)
}

/// Value of a spoken masculine day ordinal in genitive or neuter form:
/// "третього" is 3, "перше" is 1.
fn day_ordinal(word: &str) -> Option<u32> {
    if word == "третього" {
        return Some(3);
    }
    let stem = word
        .strip_suffix("ого")
        .or_else(|| word.strip_suffix("є"))
        .or_else(|| word.strip_suffix("е"))?;
    let masculine = format!("{}ий", stem);
    lexicon::ordinal_from_masculine(&masculine).map(|v| v as u32)
}

/// Lowercase, strip punctuation, fold evening phrases, and rewrite spoken
/// day ordinals to digits. Ordinals above twenty absorb a following unit
/// ordinal ("двадцять третього" becomes "23").
fn clean_words(text: &str) -> Vec<String> {
    let mut lowered = text
        .to_lowercase()
        .replace('?', "")
        .replace('.', "")
        .replace(',', "");
    for phrase in ["сьогодні вечером", "сьогодні ввечері"] {
        lowered = lowered.replace(phrase, "ввечері");
    }
    lowered = lowered.replace("сьогодні вночі", "вночі");

    let mut words: Vec<String> = lowered.split_whitespace().map(str::to_string).collect();
    let count = words.len();
    for idx in 0..count {
        let Some(mut ordinal) = day_ordinal(&words[idx]) else {
            continue;
        };
        let mut absorbed_next = false;
        if ordinal > 19 {
            if let Some(unit) = words.get(idx + 1).and_then(|w| day_ordinal(w)) {
                if unit < 10 && ordinal + unit <= 31 {
                    ordinal += unit;
                    absorbed_next = true;
                }
            }
        }
        words[idx] = format!("{}", ordinal);
        if absorbed_next {
            words[idx + 1] = String::new();
        }
    }
    words.retain(|w| !w.is_empty());
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
    let mut preposition = String::new();
    let mut time_qualifier = String::new();

    let mut followups: Vec<&str> = Vec::new();
    followups.extend_from_slice(DAYS);
    followups.extend_from_slice(lexicon::MONTHS);
    followups.extend_from_slice(MONTHS_SHORT);
    followups.extend_from_slice(&["сьогодні", "завтра", "післязавтра", "вчора", "позавчора"]);
    followups.extend_from_slice(WORDS_NEXT);
    followups.extend_from_slice(WORDS_PREV);
    followups.extend_from_slice(WORDS_CURRENT);
    followups.extend_from_slice(WORDS_NOW);

    // date pass
    for idx in 0..buffer.len() {
        let raw = buffer.get(idx).to_string();
        if raw.is_empty() {
            continue;
        }
        if MARKERS.contains(&raw.as_str()) {
            preposition = raw.clone();
        }

        let word = normalize_datetime_word(&raw);
        let word_prev_prev = normalize_datetime_word(buffer.get_rel(idx, -2));
        let word_prev = normalize_datetime_word(buffer.get_rel(idx, -1));
        let word_next = normalize_datetime_word(buffer.get_rel(idx, 1));
        let word_next_next = normalize_datetime_word(buffer.get_rel(idx, 2));

        let mut start = idx as isize;
        let mut used = 0usize;

        if WORDS_NOW.contains(&word.as_str()) && acc.explicit.is_none() {
            // "зараз" resolves to the anchor instant itself
            let mut keep: Vec<&str> = Vec::new();
            for i in idx + 1..buffer.len() {
                let w = buffer.get(i);
                if !w.is_empty() {
                    keep.push(w);
                }
            }
            let anchor_naive = anchor.naive_local();
            let truncated = anchor_naive.with_nanosecond(0).unwrap_or(anchor_naive);
            let resolved = match anchor.timezone().from_local_datetime(&truncated) {
                chrono::LocalResult::Single(dt) => dt,
                chrono::LocalResult::Ambiguous(dt, _) => dt,
                chrono::LocalResult::None => {
                    return Err(DateTimeError::InvalidDate {
                        reference: truncated.to_string(),
                    })
                }
            };
            return Ok(Some((resolved, keep.join(" "))));
        } else if YEAR_MULTIPLES.contains(&word_next.as_str()) {
            let multiplier = parse_numeric(&word)
                .or_else(|| lexicon::LEXICON.cardinal(&normalize_number_word(&word)))
                .unwrap_or(1.0) as i32;
            used += 2;
            if word_next == "десятиліття" {
                acc.year_offset = multiplier * 10;
            } else if word_next == "століття" || word_next == "сторіччя" || word_next == "сторіч" {
                acc.year_offset = multiplier * 100;
            } else {
                acc.year_offset = multiplier * 1000;
            }
        } else if (is_am_qualifier(&raw) || is_pm_qualifier(&raw))
            && preposition != "через"
            && word_next != "тому"
        {
            time_qualifier = raw.clone();
        } else if word == "сьогодні" && !from_flag {
            acc.day_offset = 0.0;
            used += 1;
        } else if word == "завтра" && !from_flag {
            acc.day_offset = 1.0;
            used += 1;
        } else if word == "післязавтра" && !from_flag {
            acc.day_offset = 2.0;
            used += 1;
        } else if word == "після" && word_next == "завтра" && !from_flag {
            acc.day_offset = 2.0;
            used += 2;
        } else if word == "позавчора" && !from_flag {
            acc.day_offset = -2.0;
            used += 1;
        } else if word == "вчора" && !from_flag {
            acc.day_offset = -1.0;
            used += 1;
        } else if word == "день"
            && word_next == "після"
            && word_next_next == "завтра"
            && !from_flag
            && !starts_with_digit(&word_prev)
        {
            acc.day_offset = 2.0;
            used = 2;
        } else if word == "день" && starts_with_digit(&word_prev) {
            let n = leading_digits(&word_prev).unwrap_or(0) as f64;
            if word_next == "тому" {
                acc.day_offset -= n;
                start -= 1;
                used = 3;
            } else if preposition == "через" || word_prev_prev == "на" {
                acc.day_offset += n;
                start -= 1;
                used = 2;
            }
        } else if word == "тиждень" && !from_flag && (preposition == "через" || preposition == "на")
        {
            if starts_with_digit(&word_prev) {
                acc.day_offset = leading_digits(&word_prev).unwrap_or(0) as f64 * 7.0;
                start -= 1;
                used = 2;
            } else if WORDS_NEXT.contains(&word_prev.as_str()) {
                acc.day_offset = 7.0;
                start -= 1;
                used = 2;
            } else if WORDS_PREV.contains(&word_prev.as_str()) {
                acc.day_offset = -7.0;
                start -= 1;
                used = 2;
            }
        } else if word == "місяць" && !from_flag && (preposition == "через" || preposition == "на")
        {
            if starts_with_digit(&word_prev) {
                acc.month_offset = leading_digits(&word_prev).unwrap_or(0) as i32;
                start -= 1;
                used = 2;
            } else if WORDS_NEXT.contains(&word_prev.as_str()) {
                acc.month_offset = 1;
                start -= 1;
                used = 2;
            } else if WORDS_PREV.contains(&word_prev.as_str()) {
                acc.month_offset = -1;
                start -= 1;
                used = 2;
            }
        } else if word == "рік" && !from_flag && (preposition == "через" || preposition == "на") {
            if starts_with_digit(&word_prev) {
                let mut n = leading_digits(&word_prev).unwrap_or(0) as i32;
                if starts_with_digit(&word_prev_prev) {
                    n *= leading_digits(&word_prev_prev).unwrap_or(1) as i32;
                }
                acc.year_offset = n;
                start -= 1;
                used = 2;
            } else if WORDS_NEXT.contains(&word_prev.as_str()) {
                acc.year_offset = 1;
                start -= 1;
                used = 2;
            } else if WORDS_PREV.contains(&word_prev.as_str()) {
                acc.year_offset = -1;
                start -= 1;
                used = 2;
            } else if word_prev == "через" {
                acc.year_offset = 1;
                used = 1;
            }
        } else if DAYS.contains(&word.as_str()) && !from_flag {
            let d = DAYS.iter().position(|&x| x == word).unwrap_or(0) as u32;
            acc.day_offset = days_until_weekday(anchor, d);
            used = 1;
            if WORDS_NEXT.contains(&word_prev.as_str()) {
                // "next" promises at least two days ahead
                if acc.day_offset <= 2.0 {
                    acc.day_offset += 7.0;
                }
                used += 1;
                start -= 1;
            } else if WORDS_PREV.contains(&word_prev.as_str()) {
                acc.day_offset -= 7.0;
                used += 1;
                start -= 1;
            }
        } else if let Some(m) = lexicon::MONTHS
            .iter()
            .position(|&x| x == word)
            .or_else(|| MONTHS_SHORT.iter().position(|&x| x == word))
        {
            if !from_flag {
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

        // "до п'ятниці", "з завтра"
        if matches!(raw.as_str(), "до" | "по" | "з") && followups.contains(&word_next.as_str()) {
            used = 2;
            from_flag = true;
            if word_next == "завтра" {
                acc.day_offset += 1.0;
            } else if word_next == "післязавтра" {
                acc.day_offset += 2.0;
            } else if word_next == "вчора" {
                acc.day_offset -= 1.0;
            } else if word_next == "позавчора" {
                acc.day_offset -= 2.0;
            } else if DAYS.contains(&word_next.as_str()) {
                let d = DAYS.iter().position(|&x| x == word_next).unwrap_or(0) as u32;
                acc.day_offset += days_until_weekday(anchor, d);
            } else if DAYS.contains(&word_next_next.as_str()) {
                let d = DAYS.iter().position(|&x| x == word_next_next).unwrap_or(0) as u32;
                let mut tmp_offset = days_until_weekday(anchor, d);
                used = 3;
                if WORDS_NEXT.contains(&word_next.as_str()) {
                    if acc.day_offset <= 2.0 {
                        tmp_offset += 7.0;
                    }
                    used += 1;
                    start -= 1;
                } else if WORDS_PREV.contains(&word_next.as_str()) {
                    tmp_offset -= 7.0;
                    used += 1;
                    start -= 1;
                }
                acc.day_offset += tmp_offset;
            }
        }

        if used > 0 {
            if start - 1 >= 0 && WORDS_CURRENT.contains(&buffer.get((start - 1) as usize)) {
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
    let anchor_naive = anchor.naive_local();
    preposition.clear();
    for idx in 0..buffer.len() {
        let raw = buffer.get(idx).to_string();
        if raw.is_empty() {
            continue;
        }
        if MARKERS.contains(&raw.as_str()) {
            preposition = raw.clone();
        }

        let word = raw.clone();
        let word_prev_prev = normalize_datetime_word(buffer.get_rel(idx, -2));
        let word_prev = normalize_datetime_word(buffer.get_rel(idx, -1));
        let word_next = normalize_datetime_word(buffer.get_rel(idx, 1));
        let word_next_next = normalize_datetime_word(buffer.get_rel(idx, 2));

        let mut used = 0usize;

        if word == "опівдні" {
            acc.hr_abs = Some(12);
            used += 1;
        } else if word == "північ" {
            acc.hr_abs = Some(0);
            used += 1;
        } else if WORDS_MORNING.contains(&word.as_str()) {
            if acc.hr_abs.is_none() {
                acc.hr_abs = Some(8);
            }
            used += 1;
        } else if WORDS_DAYTIME.contains(&word.as_str()) {
            if acc.hr_abs.is_none() {
                acc.hr_abs = Some(15);
            }
            used += 1;
        } else if WORDS_EVENING.contains(&word.as_str()) {
            if acc.hr_abs.is_none() {
                acc.hr_abs = Some(19);
            }
            used += 1;
            // a following colon time carries the real hour
            if starts_with_digit(buffer.get_rel(idx, 1)) && buffer.get_rel(idx, 1).contains(':') {
                used -= 1;
            }
        } else if WORDS_NIGHT.contains(&word.as_str()) {
            if acc.hr_abs.is_none() {
                acc.hr_abs = Some(22);
            }
        } else if matches!(word.as_str(), "година" | "годину" | "години")
            && (MARKERS.contains(&word_prev.as_str()) || MARKERS.contains(&word_prev_prev.as_str()))
        {
            if matches!(word_prev.as_str(), "пів" | "половина" | "опів") {
                acc.min_offset = 30.0;
            } else if word_prev == "чверть" {
                acc.min_offset = 15.0;
            } else {
                // "через годину"
                acc.hr_offset = 1.0;
            }
            if MARKERS.contains(&word_prev_prev.as_str()) {
                if idx > 1 {
                    buffer.consume(idx - 2);
                }
                if WORDS_CURRENT.contains(&word_prev_prev.as_str()) {
                    acc.day_specified = true;
                }
            }
            if idx > 0 {
                buffer.consume(idx - 1);
            }
            used += 1;
            acc.hr_abs = Some(-1);
            acc.min_abs = Some(-1);
        } else if word == "хвилину" && word_prev == "через" {
            acc.min_offset = 1.0;
            if idx > 0 {
                buffer.consume(idx - 1);
            }
            used += 1;
        } else if word == "секунду" && word_prev == "через" {
            acc.sec_offset = 1.0;
            if idx > 0 {
                buffer.consume(idx - 1);
            }
            used += 1;
        } else if starts_with_digit(&word) {
            let mut is_time = true;
            let mut military = false;
            let mut str_hh = String::new();
            let mut str_mm = String::new();
            let mut remainder = String::new();
            let word_next_next_next = normalize_datetime_word(buffer.get_rel(idx, 3));

            // evening and night words around a bare number read as pm
            let pm_nearby = [
                &word_prev_prev,
                &word_prev,
                &word_next,
                &word_next_next,
                &word_next_next_next,
            ]
            .iter()
            .any(|w| WORDS_EVENING.contains(&w.as_str()) || WORDS_NIGHT.contains(&w.as_str()));
            if pm_nearby {
                remainder = "pm".to_string();
                for offset in [-2isize, -1] {
                    let w = normalize_datetime_word(buffer.get_rel(idx, offset));
                    if WORDS_EVENING.contains(&w.as_str()) || WORDS_NIGHT.contains(&w.as_str()) {
                        let target = idx as isize + offset;
                        if target >= 0 {
                            buffer.consume(target as usize);
                        }
                    }
                }
                for offset in [1isize, 2, 3] {
                    let w = normalize_datetime_word(buffer.get_rel(idx, offset));
                    if WORDS_EVENING.contains(&w.as_str()) || WORDS_NIGHT.contains(&w.as_str()) {
                        used += 1;
                    }
                }
            }

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
                if remainder.is_empty() {
                    let next_raw = buffer.get_rel(idx, 1).replace('.', "");
                    if matches!(
                        next_raw.as_str(),
                        "am" | "pm" | "ночі" | "ранку" | "дня" | "вечора"
                    ) {
                        remainder = match next_raw.as_str() {
                            "am" | "ночі" | "ранку" => "am".to_string(),
                            _ => "pm".to_string(),
                        };
                        used += 1;
                    } else if is_am_qualifier(&word_next) {
                        remainder = "am".to_string();
                        used += 2;
                    } else if is_pm_qualifier(&word_next) {
                        remainder = "pm".to_string();
                        used += 2;
                    } else if matches!(buffer.get_rel(idx, 1), "в" | "о" | "на")
                        && (is_am_qualifier(&word_next_next) || is_pm_qualifier(&word_next_next))
                    {
                        if WORDS_NIGHT.contains(&word_next_next.as_str()) {
                            let hh = leading_digits(&str_hh).unwrap_or(0);
                            remainder = if hh > 5 { "pm" } else { "am" }.to_string();
                        } else if is_am_qualifier(&word_next_next) {
                            remainder = "am".to_string();
                        } else {
                            remainder = "pm".to_string();
                        }
                        used += 2;
                    } else if let Some(h) = acc.hr_abs.filter(|&h| h != -1) {
                        remainder = if h >= 12 { "pm" } else { "am" }.to_string();
                        used += 1;
                    } else if !time_qualifier.is_empty() {
                        if is_pm_qualifier(&time_qualifier) {
                            remainder = "pm".to_string();
                        } else if is_am_qualifier(&time_qualifier) {
                            remainder = "am".to_string();
                        } else {
                            military = true;
                        }
                    }
                }
            } else {
                let mut str_num = String::new();
                let mut tail = String::new();
                for c in word.chars() {
                    if c.is_ascii_digit() {
                        str_num.push(c);
                    } else {
                        tail.push(c);
                    }
                }
                if tail.is_empty() {
                    tail = buffer.get_rel(idx, 1).replace('.', "");
                }
                let num = leading_digits(&str_num).unwrap_or(0);

                if remainder == "pm" {
                    str_hh = str_num.clone();
                } else if tail == "pm"
                    || (tail == "дня" && preposition != "через")
                    || tail == "вечора"
                {
                    str_hh = str_num.clone();
                    remainder = "pm".to_string();
                    used = 1;
                } else if matches!(tail.as_str(), "am" | "ночі" | "ранку") {
                    str_hh = str_num.clone();
                    remainder = "am".to_string();
                    used = 1;
                } else if RECUR_MARKERS.contains(&word_next.as_str())
                    || RECUR_MARKERS.contains(&word_next_next.as_str())
                {
                    // "7 щопонеділка": hour with a recurring day
                    str_hh = str_num.clone();
                    used = 1;
                } else if (word_next == "година" || word_next == "годину")
                    && !word.starts_with('0')
                    && word_prev == "через"
                    && (num < 100 || num > 2400)
                {
                    // "через 3 години"
                    acc.hr_offset = num as f64;
                    used = 2;
                    is_time = false;
                    acc.hr_abs = Some(-1);
                    acc.min_abs = Some(-1);
                } else if word_next == "хвилина" {
                    acc.min_offset = num as f64;
                    used = 2;
                    is_time = false;
                    acc.hr_abs = Some(-1);
                    acc.min_abs = Some(-1);
                } else if word_next == "секунда" {
                    acc.sec_offset = num as f64;
                    used = 2;
                    is_time = false;
                    acc.hr_abs = Some(-1);
                    acc.min_abs = Some(-1);
                } else if num > 100 {
                    // military time, "2300 година"
                    str_hh = format!("{}", num / 100);
                    str_mm = format!("{}", num % 100);
                    military = true;
                    if word_next == "година" {
                        used += 1;
                    }
                } else if starts_with_digit(buffer.get_rel(idx, 1)) {
                    // "04 38" military pairs
                    str_hh = str_num.clone();
                    str_mm = buffer.get_rel(idx, 1).to_string();
                    military = true;
                    used += 1;
                    if word_next_next == "година" {
                        used += 1;
                    }
                } else if word_next.is_empty()
                    || word_next == "година"
                    || is_pm_qualifier(&word_next)
                    || is_pm_qualifier(&word_next_next)
                    || is_am_qualifier(&word_next)
                    || is_am_qualifier(&word_next_next)
                {
                    str_hh = str_num.clone();
                    str_mm = "00".to_string();
                    if word_next == "година" {
                        used += 1;
                    }
                    if is_pm_qualifier(&word_next) || is_pm_qualifier(&word_next_next) {
                        remainder = "pm".to_string();
                        used += 1;
                    } else if is_am_qualifier(&word_next) || is_am_qualifier(&word_next_next) {
                        remainder = "am".to_string();
                        used += 1;
                    } else if !time_qualifier.is_empty() {
                        if is_pm_qualifier(&time_qualifier) {
                            remainder = "pm".to_string();
                        } else if is_am_qualifier(&time_qualifier) {
                            remainder = "am".to_string();
                        } else {
                            military = true;
                        }
                    }
                } else {
                    is_time = false;
                }
                if is_time && str_hh.is_empty() {
                    str_hh = str_num;
                }
            }

            if is_time {
                let mut hh = leading_digits(&str_hh).unwrap_or(0);
                let mm = leading_digits(&str_mm).unwrap_or(0);
                if remainder == "pm" && hh < 12 {
                    hh += 12;
                } else if remainder == "am" && hh >= 12 {
                    hh -= 12;
                }
                if !military
                    && remainder.is_empty()
                    && (!acc.day_specified || (0.0..1.0).contains(&acc.day_offset))
                {
                    // ambiguous hour: the next occurrence wins
                    let now_h = anchor_naive.hour() as i64;
                    let now_m = anchor_naive.minute() as i64;
                    if now_h < hh || (now_h == hh && now_m < mm) {
                        // still ahead of us today
                    } else if now_h < hh + 12 {
                        hh += 12;
                    } else {
                        acc.day_offset += 1.0;
                    }
                }
                if is_pm_qualifier(&time_qualifier) && hh < 12 {
                    hh += 12;
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
            if word_prev == "скоро" {
                acc.hr_offset = -1.0;
                if idx > 0 {
                    buffer.consume(idx - 1);
                }
            } else if word_prev == "пізніше" {
                acc.hr_offset = 1.0;
                if idx > 0 {
                    buffer.consume(idx - 1);
                }
            }
            if idx > 0 && MARKERS.contains(&buffer.get(idx - 1)) {
                if WORDS_CURRENT.contains(&buffer.get(idx - 1)) {
                    acc.day_specified = true;
                }
                buffer.consume(idx - 1);
            }
            if idx > 1 && MARKERS.contains(&buffer.get(idx - 2)) {
                if WORDS_CURRENT.contains(&buffer.get(idx - 2)) {
                    acc.day_specified = true;
                }
                buffer.consume(idx - 2);
            }
            acc.found = true;
        }
    }

    if !acc.date_found() {
        return Ok(None);
    }

    let resolved = resolve(anchor, &acc, default_time)?;
    Ok(Some((resolved, buffer.leftover(&["і"]))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn anchor() -> DateTime<Utc> {
        // вівторок (tuesday)
        Utc.with_ymd_and_hms(2017, 6, 27, 13, 4, 0).unwrap()
    }

    #[test]
    fn test_clean_words_rewrites_spoken_ordinals() {
        assert_eq!(
            clean_words("двадцятого третього червня"),
            vec!["23".to_string(), "червня".to_string()]
        );
        assert_eq!(
            clean_words("тридцятого грудня"),
            vec!["30".to_string(), "грудня".to_string()]
        );
    }

    #[test]
    fn test_now_returns_anchor() {
        let (dt, leftover) = extract_datetime("зараз йде дощ", &anchor(), None)
            .unwrap()
            .unwrap();
        assert_eq!(dt, anchor());
        assert_eq!(leftover, "йде дощ");
    }

    #[test]
    fn test_tomorrow() {
        let (dt, leftover) = extract_datetime("постав будильник завтра", &anchor(), None)
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 28, 0, 0, 0).unwrap());
        assert_eq!(leftover, "постав будильник");
    }

    #[test]
    fn test_in_an_hour_is_relative() {
        let (dt, _) = extract_datetime("нагадай через годину", &anchor(), None)
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 27, 14, 4, 0).unwrap());
    }

    #[test]
    fn test_evening_hour_reads_pm() {
        let (dt, _) = extract_datetime("зустріч о 8 вечора", &anchor(), None)
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 27, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_explicit_date_rolls_year() {
        // 5 червня passed relative to the anchor
        let (dt, _) = extract_datetime("нагадай 5 червня", &anchor(), None)
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2018, 6, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_next_weekday_is_at_least_two_days_out() {
        // середа is tomorrow; "наступна середа" skips a week
        let (dt, _) = extract_datetime("наступна середа", &anchor(), None)
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 7, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_no_content_returns_none() {
        assert!(extract_datetime("яка погода", &anchor(), None)
            .unwrap()
            .is_none());
        assert!(extract_datetime("", &anchor(), None).unwrap().is_none());
    }
}
