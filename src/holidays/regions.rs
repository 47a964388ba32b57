//! Jurisdiction tables: (country, region, subregion) -> ordered holiday keys.
//!
//! Region and subregion names arrive as their leading token and are matched
//! case-insensitively; both full names and the usual two-letter codes are
//! accepted. An unknown region yields an empty key list, not the nationwide
//! base, so a misspelled state never silently produces a too-small calendar.

use super::rules;
use super::Holiday;
use chrono::{Days, NaiveDate, Weekday};

const GERMANY_FEDERAL: &[&str] = &[
    "neujahr",
    "karfreitag",
    "ostermontag",
    "tag-der-arbeit",
    "christi-himmelfahrt",
    "pfingstmontag",
    "tag-der-deutschen-einheit",
    "erster-weihnachtstag",
    "zweiter-weihnachtstag",
];

const AUSTRIA: &[&str] = &[
    "neujahr",
    "heilige-drei-koenige",
    "ostermontag",
    "staatsfeiertag",
    "christi-himmelfahrt",
    "pfingstmontag",
    "fronleichnam",
    "mariae-himmelfahrt",
    "nationalfeiertag",
    "allerheiligen",
    "mariae-empfaengnis",
    "christtag",
    "stefanitag",
];

// Holidays every supported canton observes. Canton extras come on top.
const SWITZERLAND_BASE: &[&str] = &[
    "neujahr",
    "karfreitag",
    "ostermontag",
    "auffahrt",
    "pfingstmontag",
    "bundesfeiertag",
    "weihnachten",
];

pub(super) fn jurisdiction_keys(
    country: &str,
    region: Option<&str>,
    subregion: Option<&str>,
) -> Vec<&'static str> {
    let region = region.map(str::to_lowercase);
    let subregion = subregion.map(str::to_lowercase);

    match country.trim().to_ascii_uppercase().as_str() {
        "DE" => german_keys(region.as_deref(), subregion.as_deref()),
        "AT" => AUSTRIA.to_vec(),
        "CH" => swiss_keys(region.as_deref()),
        _ => Vec::new(),
    }
}

fn german_keys(region: Option<&str>, subregion: Option<&str>) -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = GERMANY_FEDERAL.to_vec();
    let Some(region) = region else {
        return keys;
    };

    let catholic_south: &[&str] = &["heilige-drei-koenige", "fronleichnam", "allerheiligen"];
    let extras: &[&str] = match region {
        "baden-württemberg" | "baden-wuerttemberg" | "bw" => catholic_south,
        "bayern" | "by" => catholic_south,
        "berlin" => &["frauentag"],
        "brandenburg" | "bb" => &["reformationstag"],
        "bremen" | "hb" => &["reformationstag"],
        "hamburg" | "hh" => &["reformationstag"],
        "hessen" | "he" => &["fronleichnam"],
        "mecklenburg-vorpommern" | "mv" => &["frauentag", "reformationstag"],
        "niedersachsen" | "ni" => &["reformationstag"],
        "nordrhein-westfalen" | "nw" => &["fronleichnam", "allerheiligen"],
        "rheinland-pfalz" | "rp" => &["fronleichnam", "allerheiligen"],
        "saarland" | "sl" => &["fronleichnam", "mariae-himmelfahrt", "allerheiligen"],
        "sachsen" | "sn" => &["reformationstag", "buss-und-bettag"],
        "sachsen-anhalt" | "st" => &["heilige-drei-koenige", "reformationstag"],
        "schleswig-holstein" | "sh" => &["reformationstag"],
        "thüringen" | "thueringen" | "th" => &["weltkindertag", "reformationstag"],
        _ => return Vec::new(),
    };
    keys.extend_from_slice(extras);

    // Assumption Day is statutory only in the Catholic-majority parts of
    // Bavaria; Augsburg additionally keeps its Friedensfest.
    if matches!(region, "bayern" | "by") {
        match subregion {
            Some("augsburg") => keys.extend_from_slice(&["mariae-himmelfahrt", "friedensfest"]),
            Some("katholisch") => keys.push("mariae-himmelfahrt"),
            _ => {}
        }
    }
    keys
}

fn swiss_keys(region: Option<&str>) -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = SWITZERLAND_BASE.to_vec();
    let Some(region) = region else {
        return keys;
    };

    let extras: &[&str] = match region {
        "zürich" | "zuerich" | "zh" => &[
            "berchtoldstag",
            "sechselaeuten",
            "tag-der-arbeit",
            "knabenschiessen",
            "stephanstag",
        ],
        "bern" | "berne" | "be" => &["berchtoldstag", "stephanstag"],
        "luzern" | "lucerne" | "lu" => &[
            "berchtoldstag",
            "fronleichnam",
            "mariae-himmelfahrt",
            "allerheiligen",
            "mariae-empfaengnis",
            "stephanstag",
        ],
        "genève" | "geneve" | "genf" | "ge" => &["jeune-genevois", "restauration-genevoise"],
        "vaud" | "waadt" | "vd" => &["berchtoldstag", "lundi-du-jeune"],
        _ => return Vec::new(),
    };
    keys.extend_from_slice(extras);
    keys
}

/// Resolve a holiday key to its display name and date for one year.
pub(super) fn resolve(key: &str, year: i32) -> Option<Holiday> {
    let (name, date) = match key {
        "neujahr" => ("Neujahr", rules::fixed(year, 1, 1)),
        "berchtoldstag" => ("Berchtoldstag", rules::fixed(year, 1, 2)),
        "heilige-drei-koenige" => ("Heilige Drei Könige", rules::fixed(year, 1, 6)),
        "frauentag" => ("Internationaler Frauentag", rules::fixed(year, 3, 8)),
        "karfreitag" => ("Karfreitag", rules::easter_offset(year, -2)),
        "ostermontag" => ("Ostermontag", rules::easter_offset(year, 1)),
        "sechselaeuten" => ("Sechseläuten", sechselaeuten(year)),
        "tag-der-arbeit" => ("Tag der Arbeit", rules::fixed(year, 5, 1)),
        "staatsfeiertag" => ("Staatsfeiertag", rules::fixed(year, 5, 1)),
        "christi-himmelfahrt" => ("Christi Himmelfahrt", rules::easter_offset(year, 39)),
        "auffahrt" => ("Auffahrt", rules::easter_offset(year, 39)),
        "pfingstmontag" => ("Pfingstmontag", rules::easter_offset(year, 50)),
        "fronleichnam" => ("Fronleichnam", rules::easter_offset(year, 60)),
        "bundesfeiertag" => ("Bundesfeiertag", rules::fixed(year, 8, 1)),
        "friedensfest" => ("Augsburger Friedensfest", rules::fixed(year, 8, 8)),
        "mariae-himmelfahrt" => ("Mariä Himmelfahrt", rules::fixed(year, 8, 15)),
        "jeune-genevois" => (
            "Jeûne genevois",
            rules::weekday_after_nth_sunday(year, 9, 1, Weekday::Thu),
        ),
        "knabenschiessen" => (
            "Knabenschiessen",
            rules::weekday_after_nth_sunday(year, 9, 2, Weekday::Mon),
        ),
        "lundi-du-jeune" => (
            "Lundi du Jeûne fédéral",
            rules::weekday_after_nth_sunday(year, 9, 3, Weekday::Mon),
        ),
        "weltkindertag" => ("Weltkindertag", rules::fixed(year, 9, 20)),
        "tag-der-deutschen-einheit" => ("Tag der Deutschen Einheit", rules::fixed(year, 10, 3)),
        "nationalfeiertag" => ("Nationalfeiertag", rules::fixed(year, 10, 26)),
        "reformationstag" => ("Reformationstag", rules::fixed(year, 10, 31)),
        "allerheiligen" => ("Allerheiligen", rules::fixed(year, 11, 1)),
        "buss-und-bettag" => ("Buß- und Bettag", rules::wednesday_before(year, 11, 23)),
        "mariae-empfaengnis" => ("Mariä Empfängnis", rules::fixed(year, 12, 8)),
        "erster-weihnachtstag" => ("Erster Weihnachtstag", rules::fixed(year, 12, 25)),
        "christtag" => ("Christtag", rules::fixed(year, 12, 25)),
        "weihnachten" => ("Weihnachten", rules::fixed(year, 12, 25)),
        "zweiter-weihnachtstag" => ("Zweiter Weihnachtstag", rules::fixed(year, 12, 26)),
        "stefanitag" => ("Stefanitag", rules::fixed(year, 12, 26)),
        "stephanstag" => ("Stephanstag", rules::fixed(year, 12, 26)),
        "restauration-genevoise" => ("Restauration de la République", rules::fixed(year, 12, 31)),
        _ => return None,
    };
    Some(Holiday { date, name })
}

// Zurich's Sechseläuten: third Monday of April, postponed a week when that
// Monday is Easter Monday.
fn sechselaeuten(year: i32) -> NaiveDate {
    let third_monday = rules::nth_weekday(year, 4, Weekday::Mon, 3);
    if third_monday == rules::easter_offset(year, 1) {
        third_monday + Days::new(7)
    } else {
        third_monday
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_jurisdictions() -> Vec<(String, Vec<&'static str>)> {
        let mut sets = vec![
            ("DE".to_string(), jurisdiction_keys("DE", None, None)),
            ("AT".to_string(), jurisdiction_keys("AT", None, None)),
            ("CH".to_string(), jurisdiction_keys("CH", None, None)),
        ];
        for land in [
            "Baden-Württemberg",
            "Bayern",
            "Berlin",
            "Brandenburg",
            "Bremen",
            "Hamburg",
            "Hessen",
            "Mecklenburg-Vorpommern",
            "Niedersachsen",
            "Nordrhein-Westfalen",
            "Rheinland-Pfalz",
            "Saarland",
            "Sachsen",
            "Sachsen-Anhalt",
            "Schleswig-Holstein",
            "Thüringen",
        ] {
            sets.push((
                format!("DE/{}", land),
                jurisdiction_keys("DE", Some(land), None),
            ));
        }
        for sub in ["katholisch", "Augsburg"] {
            sets.push((
                format!("DE/Bayern/{}", sub),
                jurisdiction_keys("DE", Some("Bayern"), Some(sub)),
            ));
        }
        for canton in ["Zürich", "Bern", "Luzern", "Genève", "Vaud"] {
            sets.push((
                format!("CH/{}", canton),
                jurisdiction_keys("CH", Some(canton), None),
            ));
        }
        sets
    }

    #[test]
    fn test_every_table_key_resolves() {
        for (jurisdiction, keys) in all_jurisdictions() {
            assert!(!keys.is_empty(), "{} has no keys", jurisdiction);
            for key in keys {
                assert!(
                    resolve(key, 2026).is_some(),
                    "{} lists dangling key {}",
                    jurisdiction,
                    key
                );
            }
        }
    }

    #[test]
    fn test_no_jurisdiction_lists_a_key_twice() {
        for (jurisdiction, keys) in all_jurisdictions() {
            let mut seen = HashSet::new();
            for key in &keys {
                assert!(seen.insert(*key), "{} lists {} twice", jurisdiction, key);
            }
        }
    }

    #[test]
    fn test_codes_match_like_full_names() {
        assert_eq!(
            jurisdiction_keys("CH", Some("zürich"), None),
            jurisdiction_keys("CH", Some("ZH"), None)
        );
        assert_eq!(
            jurisdiction_keys("DE", Some("Thüringen"), None),
            jurisdiction_keys("DE", Some("th"), None)
        );
    }

    #[test]
    fn test_unknown_region_is_empty_not_the_nationwide_base() {
        assert!(jurisdiction_keys("DE", Some("Elbonien"), None).is_empty());
        assert!(jurisdiction_keys("CH", Some("Aargau"), None).is_empty());
    }

    #[test]
    fn test_unresolved_keys_are_rejected() {
        assert!(resolve("totensonntag", 2026).is_none());
    }
}
