//! Implementation of the `dialplan holidays` command.
//!
//! Prints the computed holiday calendar for a jurisdiction and year. The
//! jurisdiction comes from flags or from a config's holiday fields; with
//! `--fill` the computed dates are written into the config's holiday list
//! as whole-day closures, skipping dates already present.

use crate::cli::HolidaysArgs;
use crate::config::{HolidayEntry, ProvisionConfig};
use crate::error::{DialplanError, Result};
use crate::holidays::{holidays_for, Holiday};
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashSet;
use std::path::Path;

/// Execute the `dialplan holidays` command.
pub(super) fn cmd_holidays(args: HolidaysArgs) -> Result<()> {
    match &args.config {
        Some(path) => holidays_from_config(path, args.year, args.fill),
        None => holidays_from_flags(&args),
    }
}

fn holidays_from_flags(args: &HolidaysArgs) -> Result<()> {
    let country = args.country.as_deref().ok_or_else(|| {
        DialplanError::UserError("--country is required without --config".to_string())
    })?;
    let region = args.region.as_deref();
    let subregion = args.subregion.as_deref();

    let holidays = compute(country, region, subregion, args.year)?;
    print_calendar(&scope_label(country, region, subregion), args.year, &holidays);
    Ok(())
}

fn holidays_from_config(path: &Path, year: i32, fill: bool) -> Result<()> {
    let mut config = ProvisionConfig::load(path)?;
    let country = config.holiday_country.clone().ok_or_else(|| {
        DialplanError::UserError(format!(
            "config '{}' has no holiday_country; set it or pass --country",
            path.display()
        ))
    })?;
    let region = config.holiday_region.clone();
    let subregion = config.holiday_subregion.clone();

    let holidays = compute(&country, region.as_deref(), subregion.as_deref(), year)?;
    print_calendar(
        &scope_label(&country, region.as_deref(), subregion.as_deref()),
        year,
        &holidays,
    );

    if fill {
        fill_config(&mut config, path, &holidays)?;
    }
    Ok(())
}

fn compute(
    country: &str,
    region: Option<&str>,
    subregion: Option<&str>,
    year: i32,
) -> Result<Vec<Holiday>> {
    let holidays = holidays_for(country, region, subregion, year);
    if holidays.is_empty() {
        return Err(DialplanError::UserError(format!(
            "no holiday calendar for {} (unsupported jurisdiction)",
            scope_label(country, region, subregion)
        )));
    }
    Ok(holidays)
}

fn scope_label(country: &str, region: Option<&str>, subregion: Option<&str>) -> String {
    let mut scope = country.to_uppercase();
    for part in [region, subregion].into_iter().flatten() {
        scope.push_str(", ");
        scope.push_str(part);
    }
    scope
}

fn print_calendar(scope: &str, year: i32, holidays: &[Holiday]) {
    println!("Holidays for {} in {}:", scope, year);
    println!();
    for holiday in holidays {
        println!("  {}  {}", holiday.date.format("%d.%m.%Y"), holiday.name);
    }
}

/// Append the computed holidays as whole-day closures, skipping dates the
/// config already covers, then save the sorted list atomically.
fn fill_config(config: &mut ProvisionConfig, path: &Path, holidays: &[Holiday]) -> Result<()> {
    let existing: HashSet<NaiveDate> = config.holidays.iter().map(|h| h.date).collect();

    let mut added = 0;
    for holiday in holidays {
        if existing.contains(&holiday.date) {
            continue;
        }
        config.holidays.push(HolidayEntry {
            date: holiday.date,
            time: NaiveTime::MIN,
            name: Some(holiday.name.to_string()),
            end_date: None,
            end_time: None,
        });
        added += 1;
    }

    config.holidays = config.sorted_holidays();
    config.save(path)?;

    println!();
    println!(
        "Added {} holiday(s) to '{}' ({} already present).",
        added,
        path.display(),
        holidays.len() - added
    );
    Ok(())
}
