//! Ukrainian inflection folding
//!
//!     Numerals and calendar words decline: "п'ятьох", "п'ятьма" and
//!     "п'ятьом" are all forms of "п'ять". The number scanner and the
//!     datetime scanner each fold a word down to its table form before any
//!     lookup. Number folding handles the forms of "один", a table of
//!     irregular case forms for the small numbers, and suffix rules for the
//!     teens, the tens and the hundreds. Datetime folding maps time units,
//!     weekday and month forms onto one canonical word per concept.

use crate::lang::uk::lexicon;
use crate::lang::uk::lexicon::{IRREGULAR_CASE_FORMS, ONE_FORMS};

fn irregular_case_value(word: &str) -> Option<u32> {
    IRREGULAR_CASE_FORMS
        .iter()
        .find(|(form, _)| *form == word)
        .map(|(_, value)| *value)
}

fn strip_any(word: &str, endings: &[&str]) -> Option<String> {
    for ending in endings {
        if let Some(stem) = word.strip_suffix(ending) {
            return Some(stem.to_string());
        }
    }
    None
}

/// Fold a declined numeral down to the form the number tables hold.
///
/// Irregular forms resolve before the base-form pass-through; only the
/// base table words themselves are exempt from the suffix rules, since
/// forms like "п'ятсот" would otherwise lose their own endings.
pub fn normalize_number_word(word: &str) -> String {
    if ONE_FORMS.contains(&word) {
        return "один".to_string();
    }
    if let Some(value) = irregular_case_value(word) {
        return lexicon::cardinal_name(value).to_string();
    }
    if lexicon::is_base_form(word) {
        return word.to_string();
    }

    // 11..19: "одинадцятьох" folds to "одинадцять"
    let teen_endings = [
        "надцятьома",
        "надцятьох",
        "надцятьом",
        "надцятьма",
        "надцятими",
        "надцятим",
        "надцяти",
    ];
    if let Some(stem) = strip_any(word, &teen_endings) {
        if stem.contains("один") {
            return "одинадцять".to_string();
        }
        return format!("{}надцять", stem);
    }

    // 20, 30: "двадцятьох" folds to "двадцять"
    let tens_endings = [
        "дцятьома",
        "дцятьох",
        "дцятьом",
        "дцятьма",
        "дцятими",
        "дцятим",
        "дцяти",
    ];
    if let Some(stem) = strip_any(word, &tens_endings) {
        return format!("{}дцять", stem);
    }

    // 50..80: "п'ятдесятьох" folds to "п'ятдесят"
    let fifty_endings = ["десятьома", "десятьох", "десятьом", "десятьма", "десяти"];
    if let Some(stem) = strip_any(word, &fifty_endings) {
        return format!("{}десят", stem);
    }

    // hundreds: "чотирьохстах" folds to "чотириста", "п'ятистам" to
    // "п'ятсот"; the first part names how the suffix is rebuilt
    let hundred_endings = ["стами", "стам", "стах", "ста", "сот"];
    if let Some(stem) = strip_any(word, &hundred_endings) {
        if stem.is_empty() {
            return word.to_string();
        }
        let folded = normalize_number_word(&stem);
        let value =
            irregular_case_value(&stem).or_else(|| lexicon::small_cardinal_value(&folded));
        if let Some(value) = value {
            return rebuild_hundred(value);
        }
        return folded;
    }

    word.to_string()
}

fn rebuild_hundred(value: u32) -> String {
    let first_part = lexicon::cardinal_name(value);
    match value {
        3 | 4 => format!("{}ста", first_part),
        5 | 6 | 9 => format!("{}сот", &first_part[..first_part.len() - "ь".len()]),
        7 | 8 => format!("{}сот", first_part),
        _ => first_part.to_string(),
    }
}

/// Fold a calendar word down to one canonical form per concept.
pub fn normalize_datetime_word(word: &str) -> String {
    let canonical = match word {
        "година" | "години" | "годин" | "годину" | "годинами" => "година",
        "хвилина" | "хвилини" | "хвилину" | "хвилин" | "хвилька" => "хвилина",
        "секунд" | "секунди" | "секундами" | "секунду" | "сек" => "секунда",
        "днів" | "дні" | "днями" | "дню" | "днем" => "день",
        "тижні" | "тижнів" | "тижнями" | "тиждень" | "тижня" => "тиждень",
        "місяцем" | "місяці" | "місяця" | "місяцях" | "місяцями" | "місяців" => "місяць",
        "року" | "роки" | "році" | "роках" | "роком" | "роками" | "років" => "рік",
        "ранок" | "зранку" | "вранці" | "ранку" => "вранці",
        "опівдні" | "півдня" => "південь",
        "вечер" | "ввечері" | "увечері" | "вечором" => "ввечері",
        "ніч" | "вночі" => "ніч",
        "вікенд" | "вихідних" | "вихідними" => "вихідні",
        "столітті" | "століттях" | "століть" => "століття",
        "десятиліть" | "десятиліттях" => "десятиліття",
        "понеділка" | "понеділки" => "понеділок",
        "вівторка" | "вівторки" => "вівторок",
        "середу" | "середи" => "середа",
        "четверга" => "четвер",
        "п'ятницю" | "п'ятниці" => "п'ятниця",
        "суботу" | "суботи" => "субота",
        "неділю" | "неділі" => "неділя",
        "лютому" | "лютого" | "лютим" => "лютий",
        "листопада" | "листопаді" | "листопадом" => "листопад",
        _ => "",
    };
    if !canonical.is_empty() {
        return canonical.to_string();
    }

    // remaining month names decline with "-ень" stems: "березня" folds to
    // "березень", "січневого" stays untouched (not a month form)
    let stem = strip_any(word, &["ого", "ому"])
        .or_else(|| strip_any(word, &["ні", "ня"]))
        .map(|s| format!("{}ень", s));
    if let Some(candidate) = stem {
        if lexicon::MONTHS.contains(&candidate.as_str()) {
            return candidate;
        }
    }
    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_forms_fold_to_base() {
        assert_eq!(normalize_number_word("одна"), "один");
        assert_eq!(normalize_number_word("трьома"), "три");
        assert_eq!(normalize_number_word("чотирма"), "чотири");
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(normalize_number_word("дванадцяти"), "дванадцять");
        assert_eq!(normalize_number_word("двадцяти"), "двадцять");
        assert_eq!(normalize_number_word("шістдесяти"), "шістдесят");
    }

    #[test]
    fn test_hundreds_rebuild() {
        assert_eq!(normalize_number_word("чотирьохста"), "чотириста");
        assert_eq!(normalize_number_word("трьохста"), "триста");
        assert_eq!(normalize_number_word("п'ятистам"), "п'ятсот");
        assert_eq!(normalize_number_word("семиста"), "сімсот");
    }

    #[test]
    fn test_table_forms_pass_through() {
        assert_eq!(normalize_number_word("сім"), "сім");
        assert_eq!(normalize_number_word("двадцять"), "двадцять");
        assert_eq!(normalize_number_word("будинок"), "будинок");
    }

    #[test]
    fn test_datetime_folding() {
        assert_eq!(normalize_datetime_word("хвилин"), "хвилина");
        assert_eq!(normalize_datetime_word("п'ятницю"), "п'ятниця");
        assert_eq!(normalize_datetime_word("березня"), "березень");
        assert_eq!(normalize_datetime_word("погода"), "погода");
    }
}
