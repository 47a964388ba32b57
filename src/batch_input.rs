//! Tabular batch import.
//!
//! Parses the provisioning CSV handed over by the order system into a list
//! of [`ProvisionConfig`]s. The format is a fixed 13-column header:
//!
//! `Customer,CustomerGroupName,MsFallbackDomain,RaaAnrName,LanguageId,
//! TimeZoneId,UsageLocation,PhoneNumber,PhoneNumberType,OpeningHours1Start,
//! OpeningHours1End,OpeningHours2Start,OpeningHours2End`
//!
//! Fields may be quoted with `"` and use RFC-4180 quote doubling. A row
//! whose field count does not match the header is rejected with a
//! line-numbered warning and skipped; well-formed rows still convert. The
//! two opening-hour windows fill the Monday-Friday weekly schedule.

use crate::config::types::{PhoneNumberType, TimeRange, WeeklySchedule};
use crate::config::ProvisionConfig;
use crate::error::{DialplanError, Result};
use chrono::NaiveTime;
use std::path::Path;

/// The exact, ordered batch header.
pub const EXPECTED_HEADER: &[&str] = &[
    "Customer",
    "CustomerGroupName",
    "MsFallbackDomain",
    "RaaAnrName",
    "LanguageId",
    "TimeZoneId",
    "UsageLocation",
    "PhoneNumber",
    "PhoneNumberType",
    "OpeningHours1Start",
    "OpeningHours1End",
    "OpeningHours2Start",
    "OpeningHours2End",
];

/// Result of parsing a batch file: converted configs plus row warnings.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    /// One config per well-formed row, in input order.
    pub configs: Vec<ProvisionConfig>,

    /// Line-numbered messages for every skipped row.
    pub warnings: Vec<String>,
}

/// Load and parse a batch CSV file.
pub fn load_batch_csv<P: AsRef<Path>>(path: P) -> Result<ParsedBatch> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        DialplanError::UserError(format!(
            "failed to read batch file '{}': {}",
            path.display(),
            e
        ))
    })?;

    parse_batch_csv(&content)
}

/// Parse batch CSV text.
///
/// The header must match [`EXPECTED_HEADER`] exactly. Malformed rows are
/// reported in `warnings` and skipped; only an unusable header is an error.
pub fn parse_batch_csv(input: &str) -> Result<ParsedBatch> {
    // Excel exports like to prepend a UTF-8 BOM
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut lines = input.lines().enumerate();

    // First non-blank line is the header
    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, line)) => break line.trim_end_matches('\r'),
            None => {
                return Err(DialplanError::UserError(
                    "batch input is empty: expected a header row".to_string(),
                ));
            }
        }
    };

    let header_fields = split_csv_line(header);
    let header_matches = header_fields.len() == EXPECTED_HEADER.len()
        && header_fields
            .iter()
            .map(|f| f.trim())
            .eq(EXPECTED_HEADER.iter().copied());
    if !header_matches {
        return Err(DialplanError::UserError(format!(
            "unexpected batch header '{}'.\nExpected: {}",
            header,
            EXPECTED_HEADER.join(",")
        )));
    }

    let mut batch = ParsedBatch::default();

    for (index, raw) in lines {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;

        let fields = split_csv_line(line);
        if fields.len() != EXPECTED_HEADER.len() {
            batch.warnings.push(format!(
                "line {}: expected {} fields, found {}; row skipped",
                line_number,
                EXPECTED_HEADER.len(),
                fields.len()
            ));
            continue;
        }

        match convert_row(&fields) {
            Ok(config) => batch.configs.push(config),
            Err(reason) => batch
                .warnings
                .push(format!("line {}: {}; row skipped", line_number, reason)),
        }
    }

    Ok(batch)
}

/// Split one CSV line into fields, honoring quotes and quote doubling.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    // Doubled quote inside a quoted field
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }

    fields.push(field);
    fields
}

/// Convert one well-formed row into a config, filling defaults for empty
/// optional cells.
fn convert_row(fields: &[String]) -> std::result::Result<ProvisionConfig, String> {
    let cell = |i: usize| fields[i].trim();

    let mut config = ProvisionConfig {
        customer: cell(0).to_string(),
        customer_group_name: cell(1).to_string(),
        ms_fallback_domain: cell(2).to_string(),
        anr_name: cell(3).to_string(),
        phone_number: cell(7).to_string(),
        ..Default::default()
    };

    if !cell(4).is_empty() {
        config.language_id = cell(4).to_string();
    }
    if !cell(5).is_empty() {
        config.time_zone_id = cell(5).to_string();
    }
    if !cell(6).is_empty() {
        config.usage_location = cell(6).to_string();
    }
    if !cell(8).is_empty() {
        config.phone_number_type = PhoneNumberType::from_str(cell(8))
            .ok_or_else(|| format!("unknown phone number type '{}'", cell(8)))?;
    }

    let mut windows = Vec::new();
    if let Some(range) = parse_window(cell(9), cell(10), 1)? {
        windows.push(range);
    }
    if let Some(range) = parse_window(cell(11), cell(12), 2)? {
        windows.push(range);
    }
    config.schedule = WeeklySchedule::business_days(windows);

    Ok(config)
}

fn parse_window(
    start: &str,
    end: &str,
    which: u32,
) -> std::result::Result<Option<TimeRange>, String> {
    match (start.is_empty(), end.is_empty()) {
        (true, true) => Ok(None),
        (false, false) => {
            let start = parse_hhmm(start)
                .map_err(|e| format!("opening hours {} start: {}", which, e))?;
            let end = parse_hhmm(end).map_err(|e| format!("opening hours {} end: {}", which, e))?;
            Ok(Some(TimeRange { start, end }))
        }
        _ => Err(format!("opening hours window {} is incomplete", which)),
    }
}

fn parse_hhmm(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| format!("'{}' is not a HH:MM time", s))
}
