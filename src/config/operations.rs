//! Config loading, validation, and derived-value operations.

use super::model::ProvisionConfig;
use super::types::HolidayEntry;
use crate::error::{DialplanError, Result};
use crate::naming::DerivedNames;
use crate::sanitize::sanitize_identifier;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// E.164 phone number shape.
static PHONE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9][0-9]{6,14}$").expect("Invalid phone number regex"));

impl ProvisionConfig {
    /// Load a config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward
    /// compatibility. Loading does not validate; `check` and composition
    /// report problems so an incomplete config can still be inspected.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DialplanError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| DialplanError::UserError(format!("failed to parse config YAML: {}", e)))
    }

    /// Serialize the config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            DialplanError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Write the config to a file atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::fs::atomic_write_file(path, &self.to_yaml()?)
    }

    /// All names derived from the base identity fields.
    pub fn derived_names(&self) -> DerivedNames {
        DerivedNames::derive(
            &self.customer,
            &self.customer_group_name,
            &self.ms_fallback_domain,
            &self.anr_name,
        )
    }

    /// Holiday entries ordered by (date, time).
    pub fn sorted_holidays(&self) -> Vec<HolidayEntry> {
        let mut holidays = self.holidays.clone();
        holidays.sort_by_key(|h| (h.date, h.time));
        holidays
    }

    /// Validate the config, failing on the collected findings.
    pub fn validate(&self) -> Result<()> {
        let findings = self.findings();
        if findings.is_empty() {
            Ok(())
        } else {
            Err(DialplanError::Validation(findings.join("\n")))
        }
    }

    /// Collect every validation finding instead of stopping at the first.
    ///
    /// Findings cover required identity fields, identifier character rules,
    /// the phone number shape, and schedule plausibility. An empty vector
    /// means the config is ready for composition.
    pub fn findings(&self) -> Vec<String> {
        let mut findings = Vec::new();

        for (field, value) in [
            ("customer", &self.customer),
            ("customer_group_name", &self.customer_group_name),
            ("ms_fallback_domain", &self.ms_fallback_domain),
            ("anr_name", &self.anr_name),
        ] {
            if value.trim().is_empty() {
                findings.push(format!("{} is required", field));
            } else if let Err(e) = sanitize_identifier(value) {
                findings.push(format!("{}: {}", field, e));
            }
        }

        for (field, value) in [
            ("language_id", &self.language_id),
            ("time_zone_id", &self.time_zone_id),
            ("usage_location", &self.usage_location),
        ] {
            if value.trim().is_empty() {
                findings.push(format!("{} is required", field));
            }
        }

        if self.phone_number.trim().is_empty() {
            findings.push("phone_number is required".to_string());
        } else if !PHONE_NUMBER_REGEX.is_match(self.phone_number.trim()) {
            findings.push(format!(
                "phone_number '{}' is not in E.164 format (e.g. +49401234567)",
                self.phone_number
            ));
        }

        for (day, ranges) in self.schedule.days() {
            for range in ranges {
                if range.start >= range.end {
                    findings.push(format!(
                        "schedule: {} range {} - {} is empty or inverted",
                        day,
                        range.start.format("%H:%M"),
                        range.end.format("%H:%M")
                    ));
                }
            }
        }

        for holiday in &self.holidays {
            if holiday.end() <= holiday.start() {
                findings.push(format!("holiday '{}' ends before it starts", holiday.label()));
            }
        }

        findings
    }
}
