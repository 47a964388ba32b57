//! Implementation of the `dialplan init` command.
//!
//! Scaffolds a starter provisioning config: defaults filled in, identity
//! fields left empty for the operator, Monday through Friday 08:00-17:00
//! opening hours as a starting point.

use super::log_event;
use crate::cli::InitArgs;
use crate::config::{ProvisionConfig, TimeRange, WeeklySchedule};
use crate::error::{DialplanError, Result};
use crate::events::{default_log_path, Event, EventAction, EventLog};
use crate::fs::atomic_write_file;
use chrono::NaiveTime;
use serde_json::json;

/// Execute the `dialplan init` command.
pub(super) fn cmd_init(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(DialplanError::UserError(format!(
            "config file '{}' already exists (use --force to overwrite)",
            args.path.display()
        )));
    }

    let starter = starter_config();
    atomic_write_file(&args.path, &starter.to_yaml()?)?;

    let log = EventLog::new(default_log_path(&args.path));
    log_event(
        &log,
        &Event::new(EventAction::Init).with_details(json!({
            "path": args.path.display().to_string(),
            "force": args.force,
        })),
    );

    println!("Created starter config: {}", args.path.display());
    println!();
    println!("Fill in the identity fields before provisioning:");
    println!("  customer, customer_group_name, ms_fallback_domain, anr_name, phone_number");
    println!();
    println!(
        "Then run `dialplan check --config {}` to validate.",
        args.path.display()
    );

    Ok(())
}

fn starter_config() -> ProvisionConfig {
    ProvisionConfig {
        schedule: starter_schedule(),
        ..Default::default()
    }
}

fn starter_schedule() -> WeeklySchedule {
    let open = NaiveTime::from_hms_opt(8, 0, 0).expect("Invalid starter opening time");
    let close = NaiveTime::from_hms_opt(17, 0, 0).expect("Invalid starter closing time");
    WeeklySchedule::business_days(vec![TimeRange {
        start: open,
        end: close,
    }])
}
