//! Date rule combinators used by the jurisdiction tables.

use super::computus::easter_sunday;
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Fixed calendar date. Table entries never name Feb 29.
pub(super) fn fixed(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixed holiday dates are valid")
}

/// Signed day offset from Easter Sunday.
pub(super) fn easter_offset(year: i32, days: i64) -> NaiveDate {
    let easter = easter_sunday(year);
    if days >= 0 {
        easter + Days::new(days as u64)
    } else {
        easter - Days::new(days.unsigned_abs())
    }
}

/// Nth occurrence of a weekday in a month (n is 1-based).
pub(super) fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> NaiveDate {
    let first = fixed(year, month, 1);
    let to_first_hit =
        (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
    first + Days::new((to_first_hit + 7 * (n - 1)) as u64)
}

/// Weekday strictly after the nth Sunday of a month.
///
/// Asking for Sunday yields the following Sunday, a full week later.
pub(super) fn weekday_after_nth_sunday(
    year: i32,
    month: u32,
    nth_sunday: u32,
    weekday: Weekday,
) -> NaiveDate {
    let sunday = nth_weekday(year, month, Weekday::Sun, nth_sunday);
    let gap = match weekday.num_days_from_sunday() {
        0 => 7,
        n => n,
    };
    sunday + Days::new(gap as u64)
}

/// The Wednesday strictly before a fixed date.
pub(super) fn wednesday_before(year: i32, month: u32, day: u32) -> NaiveDate {
    let anchor = fixed(year, month, day);
    let gap =
        (anchor.weekday().num_days_from_sunday() + 7 - Weekday::Wed.num_days_from_sunday()) % 7;
    let gap = if gap == 0 { 7 } else { gap };
    anchor - Days::new(gap as u64)
}
