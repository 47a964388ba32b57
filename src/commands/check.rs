//! Implementation of the `dialplan check` command.
//!
//! Collects every validation finding for a config instead of stopping at
//! the first, so the operator can fix a whole file in one edit.

use super::log_event;
use crate::cli::CheckArgs;
use crate::config::ProvisionConfig;
use crate::error::{DialplanError, Result};
use crate::events::{default_log_path, Event, EventAction, EventLog};
use serde_json::json;

/// Execute the `dialplan check` command.
pub(super) fn cmd_check(args: CheckArgs) -> Result<()> {
    let config = ProvisionConfig::load(&args.config)?;
    let findings = config.findings();

    let log = EventLog::new(default_log_path(&args.config));
    log_event(
        &log,
        &Event::new(EventAction::Check).with_details(json!({
            "config": args.config.display().to_string(),
            "findings": findings.len(),
        })),
    );

    if findings.is_empty() {
        println!("Config '{}' is valid.", args.config.display());
        return Ok(());
    }

    println!(
        "Found {} finding(s) in '{}':",
        findings.len(),
        args.config.display()
    );
    for finding in &findings {
        println!("  - {}", finding);
    }

    Err(DialplanError::Validation(format!(
        "{} finding(s) in '{}'",
        findings.len(),
        args.config.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use crate::test_support::sample_config;

    #[test]
    fn check_passes_a_complete_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.yaml");
        sample_config().save(&path).unwrap();

        cmd_check(CheckArgs { config: path }).unwrap();
    }

    #[test]
    fn check_fails_an_incomplete_config_with_validation_exit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yaml");
        ProvisionConfig::default().save(&path).unwrap();

        let err = cmd_check(CheckArgs { config: path }).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
        assert!(err.to_string().contains("finding(s)"));
    }

    #[test]
    fn check_appends_an_audit_event_even_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yaml");
        ProvisionConfig::default().save(&path).unwrap();

        let _ = cmd_check(CheckArgs {
            config: path.clone(),
        });

        let log = std::fs::read_to_string(default_log_path(&path)).unwrap();
        assert!(log.contains("\"action\":\"check\""));
    }
}
