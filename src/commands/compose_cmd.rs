//! Implementation of the `dialplan compose` command.
//!
//! Composes the script for exactly one operation and prints it or writes
//! it to a file. Nothing is dispatched; this is the inspection path for
//! reviewing what a step would run.

use super::{log_event, parse_operation, print_script};
use crate::cli::ComposeArgs;
use crate::compose::compose;
use crate::config::ProvisionConfig;
use crate::error::Result;
use crate::events::{default_log_path, Event, EventAction, EventLog};
use crate::fs::atomic_write_file;
use serde_json::json;

/// Execute the `dialplan compose` command.
pub(super) fn cmd_compose(args: ComposeArgs) -> Result<()> {
    let operation = parse_operation(&args.op)?;
    let config = ProvisionConfig::load(&args.config)?;
    let script = compose(&config, operation)?;

    let log = EventLog::new(default_log_path(&args.config));
    log_event(
        &log,
        &Event::new(EventAction::Compose)
            .with_group(config.derived_names().group_name)
            .with_details(json!({
                "operation": args.op,
                "output": args.output.as_ref().map(|p| p.display().to_string()),
            })),
    );

    match &args.output {
        Some(path) => {
            atomic_write_file(path, &script)?;
            println!("Wrote {} script to '{}'.", args.op, path.display());
        }
        None => print_script(&script),
    }

    Ok(())
}
