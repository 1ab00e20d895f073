//! Ukrainian number vocabulary
//!
//!     The tables hold one base form per numeral; declined forms are folded
//!     onto them by the morphology pass, and a generated suffix expansion
//!     covers the remaining case endings directly in the maps. Ukrainian
//!     treats "сотня" (a hundred) as a counted noun rather than a
//!     multiplier, "пара" (a pair) doubles the next number, and the presence
//!     of any long-scale multiplier switches the whole utterance to the
//!     long scale, where "трильйон" is 1e18.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::lang::uk::morphology;
use crate::lexicon::NumberLexicon;
use crate::tokenize::Token;

/// Case suffixes appended to every table word to cover declined forms the
/// morphology rules do not reach.
const CASE_SUFFIXES: &[&str] = &[
    "а", "ах", "их", "ам", "ами", "ів", "ям", "ох", "и", "на", "ни", "і", "ні", "ий", "ний",
    "ьох", "ьома", "ьом", "ум", "ма", "ом",
];

const BASE_CARDINALS: &[(&str, f64)] = &[
    ("нуль", 0.0),
    ("один", 1.0),
    ("два", 2.0),
    ("три", 3.0),
    ("чотири", 4.0),
    ("п'ять", 5.0),
    ("шість", 6.0),
    ("сім", 7.0),
    ("вісім", 8.0),
    ("дев'ять", 9.0),
    ("десять", 10.0),
    ("одинадцять", 11.0),
    ("дванадцять", 12.0),
    ("тринадцять", 13.0),
    ("чотирнадцять", 14.0),
    ("п'ятнадцять", 15.0),
    ("шістнадцять", 16.0),
    ("сімнадцять", 17.0),
    ("вісімнадцять", 18.0),
    ("дев'ятнадцять", 19.0),
    ("двадцять", 20.0),
    ("тридцять", 30.0),
    ("сорок", 40.0),
    ("п'ятдесят", 50.0),
    ("шістдесят", 60.0),
    ("сімдесят", 70.0),
    ("вісімдесят", 80.0),
    ("дев'яносто", 90.0),
    ("сто", 100.0),
    ("двісті", 200.0),
    ("триста", 300.0),
    ("чотириста", 400.0),
    ("п'ятсот", 500.0),
    ("шістсот", 600.0),
    ("сімсот", 700.0),
    ("вісімсот", 800.0),
    ("дев'ятсот", 900.0),
];

/// Irregular case forms of the small numbers that no suffix rule covers.
pub(crate) const IRREGULAR_CASE_FORMS: &[(&str, u32)] = &[
    ("дві", 2),
    ("двох", 2),
    ("двом", 2),
    ("двома", 2),
    ("трьох", 3),
    ("трьом", 3),
    ("трьома", 3),
    ("чотирьох", 4),
    ("чотирьом", 4),
    ("чотирма", 4),
    ("п'яти", 5),
    ("п'ятьох", 5),
    ("п'ятьом", 5),
    ("п'ятьма", 5),
    ("п'ятьома", 5),
    ("шести", 6),
    ("шістьох", 6),
    ("шістьом", 6),
    ("шістьма", 6),
    ("шістьома", 6),
    ("семи", 7),
    ("сімох", 7),
    ("сімом", 7),
    ("сімома", 7),
    ("восьми", 8),
    ("вісьмох", 8),
    ("вісьмом", 8),
    ("вісьма", 8),
    ("вісьмома", 8),
    ("дев'яти", 9),
    ("дев'ятьох", 9),
    ("дев'ятьом", 9),
    ("дев'ятьма", 9),
    ("дев'ятьома", 9),
    ("десяти", 10),
    ("десятьох", 10),
    ("десятьом", 10),
    ("десятьма", 10),
    ("десятьома", 10),
];

/// Case forms of "один" across gender and case.
pub(crate) const ONE_FORMS: &[&str] = &[
    "одна", "одним", "одно", "одною", "одного", "одної", "одному", "одній", "одну",
];

fn with_cases(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    let mut m: HashMap<String, f64> = HashMap::new();
    for (word, value) in entries {
        m.insert(word.to_string(), *value);
        for suffix in CASE_SUFFIXES {
            m.insert(format!("{}{}", word, suffix), *value);
        }
    }
    m
}

static CARDINALS: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let mut m = with_cases(BASE_CARDINALS);
    // "сотня" is a counted hundred, not a multiplier
    for form in ["сотня", "сотні", "сотень"] {
        m.insert(form.to_string(), 100.0);
    }
    for form in ["половина", "половиною", "половини", "половин", "половинами", "пів"] {
        m.insert(form.to_string(), 0.5);
    }
    // spoken "трильйон" means 1e18 regardless of scale tables
    for entry in with_cases(&[("трильйон", 1e18)]).keys() {
        m.insert(entry.clone(), 1e18);
    }
    for (word, value) in IRREGULAR_CASE_FORMS {
        m.insert(word.to_string(), *value as f64);
    }
    for form in ONE_FORMS {
        m.insert(form.to_string(), 1.0);
    }
    m
});

const SHORT_SCALE: &[(&str, f64)] = &[
    ("тисяча", 1000.0),
    ("мільйон", 1e6),
    ("мільярд", 1e9),
    ("трильйон", 1e12),
    ("квадрильйон", 1e15),
    ("квінтильйон", 1e18),
    ("секстильйон", 1e21),
    ("септильйон", 1e24),
];

const LONG_SCALE: &[(&str, f64)] = &[
    ("тисяча", 1000.0),
    ("мільйон", 1e6),
    ("мільярд", 1e9),
    ("більйон", 1e12),
    ("більярд", 1e15),
    ("трильйон", 1e18),
    ("трильярд", 1e21),
    ("квадрильйон", 1e24),
];

/// Irregular thousand forms the suffix expansion does not produce.
const THOUSAND_FORMS: &[&str] = &["тисяч", "тисячі", "тисячу", "тисячах", "тисячами", "тисячею"];

static SHORT_SCALE_ALL: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let mut m = with_cases(SHORT_SCALE);
    for form in THOUSAND_FORMS {
        m.insert(form.to_string(), 1000.0);
    }
    m
});

static LONG_SCALE_ALL: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let mut m = with_cases(LONG_SCALE);
    for form in THOUSAND_FORMS {
        m.insert(form.to_string(), 1000.0);
    }
    m
});

const ORDINAL_BASE: &[(&str, f64)] = &[
    ("перший", 1.0),
    ("другий", 2.0),
    ("третій", 3.0),
    ("четвертий", 4.0),
    ("п'ятий", 5.0),
    ("шостий", 6.0),
    ("сьомий", 7.0),
    ("восьмий", 8.0),
    ("дев'ятий", 9.0),
    ("десятий", 10.0),
    ("одинадцятий", 11.0),
    ("дванадцятий", 12.0),
    ("тринадцятий", 13.0),
    ("чотирнадцятий", 14.0),
    ("п'ятнадцятий", 15.0),
    ("шістнадцятий", 16.0),
    ("сімнадцятий", 17.0),
    ("вісімнадцятий", 18.0),
    ("дев'ятнадцятий", 19.0),
    ("двадцятий", 20.0),
    ("тридцятий", 30.0),
    ("сороковий", 40.0),
    ("п'ятдесятий", 50.0),
    ("шістдесятий", 60.0),
    ("сімдесятий", 70.0),
    ("вісімдесятий", 80.0),
    ("дев'яностий", 90.0),
    ("сотий", 100.0),
    ("двохсотий", 200.0),
    ("трьохсотий", 300.0),
    ("чотирьохсотий", 400.0),
    ("п'ятисотий", 500.0),
    ("шестисотий", 600.0),
    ("семисотий", 700.0),
    ("восьмисотий", 800.0),
    ("дев'ятисотий", 900.0),
    ("тисячний", 1000.0),
];

static ORDINALS: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| ORDINAL_BASE.iter().copied().collect());

fn scale_ordinal(word: &str, short_scale: bool) -> Option<f64> {
    let value = match (word, short_scale) {
        ("мільйонний", _) => 1e6,
        ("мільярдний", _) => 1e9,
        ("трильйонний", true) => 1e12,
        ("трильйонний", false) => 1e18,
        ("більйонний", false) => 1e12,
        _ => return None,
    };
    Some(value)
}

/// Masculine ordinal name for the day-ordinal rewrite in the datetime
/// cleaner ("тридцять першого" reads as day 31).
pub fn ordinal_from_masculine(name: &str) -> Option<f64> {
    ORDINALS.get(name).copied()
}

/// Feminine denominator names, base form plus declined endings.
static FRACTION_DENOMINATORS: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let base: &[(&str, f64)] = &[
        ("друга", 2.0),
        ("третя", 3.0),
        ("четверта", 4.0),
        ("п'ята", 5.0),
        ("шоста", 6.0),
        ("сьома", 7.0),
        ("восьма", 8.0),
        ("дев'ята", 9.0),
        ("десята", 10.0),
        ("одинадцята", 11.0),
        ("дванадцята", 12.0),
        ("тринадцята", 13.0),
        ("чотирнадцята", 14.0),
        ("п'ятнадцята", 15.0),
        ("шістнадцята", 16.0),
        ("сімнадцята", 17.0),
        ("вісімнадцята", 18.0),
        ("дев'ятнадцята", 19.0),
        ("двадцята", 20.0),
        ("сота", 100.0),
    ];
    let endings = ["ої", "е", "их", "ою", "і", "ими", "ій"];
    let mut m: HashMap<String, f64> = HashMap::new();
    for (word, value) in base {
        m.insert(word.to_string(), *value);
        let stem: String = {
            let mut chars: Vec<char> = word.chars().collect();
            chars.pop();
            chars.into_iter().collect()
        };
        for ending in endings {
            m.insert(format!("{}{}", stem, ending), *value);
        }
    }
    for (word, value) in [
        ("половина", 2.0),
        ("половиною", 2.0),
        ("половини", 2.0),
        ("половин", 2.0),
        ("половинами", 2.0),
        ("пів", 2.0),
        ("третина", 1.0 / 3.0),
        ("треть", 1.0 / 3.0),
        ("треті", 3.0),
        ("третьої", 3.0),
        ("чверті", 4.0),
        ("чверть", 0.25),
        ("чвертю", 0.25),
    ] {
        m.insert(word.to_string(), value);
    }
    m
});

static SUM_PREFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "двадцять",
        "20",
        "тридцять",
        "30",
        "сорок",
        "40",
        "п'ятдесят",
        "50",
        "шістдесят",
        "60",
        "сімдесят",
        "70",
        "вісімдесят",
        "80",
        "дев'яносто",
        "90",
        "сто",
        "100",
        "двісті",
        "200",
        "триста",
        "300",
        "чотириста",
        "400",
        "п'ятсот",
        "500",
        "шістсот",
        "600",
        "сімсот",
        "700",
        "вісімсот",
        "800",
        "дев'ятсот",
        "900",
    ]
    .into_iter()
    .collect()
});

static CARDINAL_VALUES: Lazy<HashSet<u64>> = Lazy::new(|| {
    BASE_CARDINALS
        .iter()
        .map(|(_, value)| *value as u64)
        .collect()
});

const PAIR_WORDS: &[&str] = &["пара", "пари", "парою", "парами"];

/// True when the word is one of the cardinal table forms (declined forms
/// included).
pub fn in_number_table(word: &str) -> bool {
    CARDINALS.contains_key(word)
}

/// True for the base cardinal names themselves; the morphology pass keeps
/// these untouched.
pub fn is_base_form(word: &str) -> bool {
    BASE_CARDINALS.iter().any(|(name, _)| *name == word)
}

/// Base name of a small cardinal, used to rebuild declined hundreds.
pub fn cardinal_name(value: u32) -> &'static str {
    BASE_CARDINALS
        .iter()
        .find(|(_, v)| *v as u32 == value)
        .map(|(name, _)| *name)
        .unwrap_or("")
}

pub fn small_cardinal_value(word: &str) -> Option<u32> {
    BASE_CARDINALS
        .iter()
        .find(|(name, value)| *name == word && *value <= 10.0)
        .map(|(_, value)| *value as u32)
}

pub const MONTHS: &[&str] = &[
    "січень",
    "лютий",
    "березень",
    "квітень",
    "травень",
    "червень",
    "липень",
    "серпень",
    "вересень",
    "жовтень",
    "листопад",
    "грудень",
];

pub struct UkrainianLexicon;

pub static LEXICON: UkrainianLexicon = UkrainianLexicon;

impl NumberLexicon for UkrainianLexicon {
    fn cardinal(&self, word: &str) -> Option<f64> {
        CARDINALS.get(word).copied()
    }

    fn scale(&self, word: &str, short_scale: bool) -> Option<f64> {
        if short_scale {
            SHORT_SCALE_ALL.get(word).copied()
        } else {
            LONG_SCALE_ALL.get(word).copied()
        }
    }

    fn ordinal(&self, word: &str, short_scale: bool) -> Option<f64> {
        ORDINALS
            .get(word)
            .copied()
            .or_else(|| scale_ordinal(word, short_scale))
    }

    /// Fraction denominators follow case: "дві п'ятих" reads 2 * 1/5
    /// because the context word is itself a number, while a lone
    /// denominator word reports its table value unchanged.
    fn fraction(&self, word: &str, context_word: &str, _short_scale: bool) -> Option<f64> {
        let d = FRACTION_DENOMINATORS.get(word).copied()?;
        if context_word == word || !in_number_table(context_word) {
            Some(d)
        } else {
            Some(1.0 / d)
        }
    }

    fn is_sum_prefix(&self, word: &str) -> bool {
        SUM_PREFIXES.contains(word)
    }

    fn is_negative(&self, word: &str) -> bool {
        word == "мінус"
    }

    fn is_pair_word(&self, word: &str) -> bool {
        PAIR_WORDS.contains(&word)
    }

    fn is_cardinal_value(&self, value: f64) -> bool {
        value.fract() == 0.0 && value >= 0.0 && CARDINAL_VALUES.contains(&(value as u64))
    }

    fn fraction_markers(&self) -> &[&'static str] {
        &["і", "та", "з"]
    }

    fn decimal_markers(&self) -> &[&'static str] {
        &["ціла", "цілих", "точка", "крапка", "кома"]
    }

    fn normalize_number_word(&self, word: &str) -> String {
        morphology::normalize_number_word(word)
    }

    /// One long-scale multiplier anywhere in the utterance switches the
    /// whole scan to the long scale.
    fn forces_long_scale(&self, tokens: &[Token]) -> bool {
        tokens
            .iter()
            .any(|t| LONG_SCALE_ALL.contains_key(&t.word.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_case_forms() {
        assert_eq!(LEXICON.cardinal("сім"), Some(7.0));
        assert_eq!(LEXICON.cardinal("сорока"), Some(40.0));
        assert_eq!(LEXICON.cardinal("сотень"), Some(100.0));
        assert_eq!(LEXICON.cardinal("пів"), Some(0.5));
    }

    #[test]
    fn test_trillion_reads_long_scale() {
        assert_eq!(LEXICON.cardinal("трильйон"), Some(1e18));
        assert_eq!(LEXICON.scale("більйон", false), Some(1e12));
        assert_eq!(LEXICON.scale("тисячу", true), Some(1000.0));
    }

    #[test]
    fn test_fraction_context() {
        // "дві п'ятих": the context word is a number, so the denominator
        // contributes its reciprocal
        assert_eq!(LEXICON.fraction("п'ятих", "дві", true), Some(1.0 / 5.0));
        assert_eq!(LEXICON.fraction("п'ятих", "п'ятих", true), Some(5.0));
        assert_eq!(LEXICON.fraction("чверть", "три", true), Some(4.0));
        assert_eq!(LEXICON.fraction("будинок", "два", true), None);
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(LEXICON.ordinal("третій", true), Some(3.0));
        assert_eq!(LEXICON.ordinal("сьомий", true), Some(7.0));
        assert_eq!(LEXICON.ordinal("трильйонний", false), Some(1e18));
    }
}
