//! Datetime and duration extraction through the Language dispatch
//!
//! Each case resolves an utterance against a fixed anchor instant
//! (tuesday, 2017-06-27 13:04 UTC) and checks the resolved instant plus
//! the leftover text.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Offset, TimeZone, Utc};
use parlance::Language;

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2017, 6, 27, 13, 4, 0).unwrap()
}

#[test]
fn test_relative_day_resets_clock() {
    let (dt, leftover) = Language::English
        .extract_datetime("set an alarm tomorrow", &anchor(), None)
        .unwrap()
        .unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 28, 0, 0, 0).unwrap());
    assert_eq!(leftover, "set an alarm");
}

#[test]
fn test_default_time_fills_the_clock() {
    let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let (dt, _) = Language::English
        .extract_datetime("tomorrow", &anchor(), Some(nine))
        .unwrap()
        .unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 28, 9, 0, 0).unwrap());
}

#[test]
fn test_relative_minutes_keep_the_clock() {
    let (dt, _) = Language::English
        .extract_datetime("in 5 minutes", &anchor(), None)
        .unwrap()
        .unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 27, 13, 9, 0).unwrap());
}

#[test]
fn test_huge_relative_offsets_do_not_panic() {
    assert!(Language::English
        .extract_datetime("in 200000000 years", &anchor(), None)
        .is_ok());
    assert!(Language::English
        .extract_datetime("in 99999999999999 days", &anchor(), None)
        .is_ok());
}

#[test]
fn test_impossible_date_is_an_error() {
    assert!(Language::English
        .extract_datetime("february 30", &anchor(), None)
        .is_err());
}

#[test]
fn test_german_relative_half_hour() {
    let (dt, _) = Language::German
        .extract_datetime("in einer halben stunde", &anchor(), None)
        .unwrap()
        .unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 27, 13, 34, 0).unwrap());
}

#[test]
fn test_ukrainian_tomorrow() {
    let (dt, leftover) = Language::Ukrainian
        .extract_datetime("постав будильник завтра", &anchor(), None)
        .unwrap()
        .unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 28, 0, 0, 0).unwrap());
    assert_eq!(leftover, "постав будильник");
}

#[test]
fn test_ukrainian_evening_hour() {
    let (dt, _) = Language::Ukrainian
        .extract_datetime("зустріч о 8 вечора", &anchor(), None)
        .unwrap()
        .unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2017, 6, 27, 20, 0, 0).unwrap());
}

#[test]
fn test_anchor_timezone_propagates() {
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let anchor = tz.with_ymd_and_hms(2017, 6, 27, 13, 4, 0).unwrap();
    let (dt, _) = Language::English
        .extract_datetime("tomorrow", &anchor, None)
        .unwrap()
        .unwrap();
    // midnight in the anchor's zone, not in UTC
    assert_eq!(dt, tz.with_ymd_and_hms(2017, 6, 28, 0, 0, 0).unwrap());
    assert_eq!(dt.offset().fix().local_minus_utc(), 2 * 3600);
}

#[test]
fn test_no_datetime_content() {
    assert!(Language::English
        .extract_datetime("i like pancakes", &anchor(), None)
        .unwrap()
        .is_none());
    assert!(Language::German
        .extract_datetime("wie ist das wetter", &anchor(), None)
        .unwrap()
        .is_none());
}

#[test]
fn test_duration_across_locales() {
    let (duration, leftover) =
        Language::English.extract_duration("3 days 8 hours 10 minutes and 49 seconds");
    assert_eq!(
        duration,
        Some(Duration::seconds(3 * 86400 + 8 * 3600 + 10 * 60 + 49))
    );
    assert_eq!(leftover, "and");

    let (duration, leftover) = Language::German.extract_duration("stelle den timer für 5 minuten");
    assert_eq!(duration, Some(Duration::seconds(300)));
    assert_eq!(leftover, "stelle den timer für");

    let (duration, leftover) =
        Language::Ukrainian.extract_duration("встанови таймер на п'ять хвилин");
    assert_eq!(duration, Some(Duration::seconds(300)));
    assert_eq!(leftover, "встанови таймер на");
}

#[test]
fn test_duration_without_content() {
    for lang in [Language::English, Language::German, Language::Ukrainian] {
        assert_eq!(lang.extract_duration(""), (None, String::new()));
    }
}
