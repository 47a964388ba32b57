//! Jurisdiction-specific holiday calendars.
//!
//! This module computes the public-holiday calendar used to pre-fill an auto
//! attendant's holiday schedule:
//!
//! - `computus`: the Meeus/Jones/Butcher Gregorian Easter algorithm
//! - `rules`: date rule combinators (fixed dates, Easter offsets, nth
//!   weekday, Sunday-relative rules)
//! - `regions`: jurisdiction tables mapping (country, region, subregion) to
//!   an ordered list of holiday keys, resolved through a key -> date
//!   function pool
//!
//! Jurisdictions are matched default-deny: anything unknown yields an empty
//! calendar rather than an error, so a typo in a region name shows up as
//! "no holidays" in the preview instead of blocking composition.

mod computus;
mod regions;
mod rules;

pub use computus::easter_sunday;

use chrono::NaiveDate;

/// One computed holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: &'static str,
}

/// Compute the holiday calendar for a jurisdiction and year, ordered by date.
///
/// `country` is an ISO 3166-1 alpha-2 code (case-insensitive). `region` is a
/// state/canton name; `subregion` narrows further (commune, confession).
/// Region and subregion strings may carry a clarifying suffix, e.g.
/// `"Augsburg (Stadt)"`; only the leading token participates in matching.
///
/// Unknown jurisdictions return an empty vector.
pub fn holidays_for(
    country: &str,
    region: Option<&str>,
    subregion: Option<&str>,
    year: i32,
) -> Vec<Holiday> {
    let keys = regions::jurisdiction_keys(
        country,
        region.map(leading_token),
        subregion.map(leading_token),
    );

    let mut holidays: Vec<Holiday> = keys
        .iter()
        .filter_map(|key| regions::resolve(key, year))
        .collect();
    holidays.sort_by_key(|h| h.date);
    holidays
}

/// First whitespace-delimited token of a region string.
///
/// `"Augsburg (Stadt)"` matches as `"Augsburg"`.
fn leading_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}
