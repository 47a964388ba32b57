//! Implementation of the `dialplan run` command.
//!
//! Composes one operation and dispatches it through the gateway. This is
//! the single-shot path for everything outside the guided sequence:
//! removals, list queries, session probes, re-running one step.

use super::{log_event, parse_operation, print_records, print_script, prompt};
use crate::cli::RunArgs;
use crate::compose::{compose, Operation};
use crate::config::ProvisionConfig;
use crate::error::{DialplanError, Result};
use crate::events::{default_log_path, Event, EventAction, EventLog};
use crate::gateway::{ExecutionGateway, ShellGateway};
use crate::orchestrator::establish_session;
use serde_json::json;
use std::time::Duration;

/// Execute the `dialplan run` command.
pub(super) fn cmd_run(args: RunArgs) -> Result<()> {
    let operation = parse_operation(&args.op)?;
    let config = ProvisionConfig::load(&args.config)?;
    config.validate()?;

    let script = compose(&config, operation)?;
    let group_name = config.derived_names().group_name;

    println!("Operation {} for {}.", args.op, group_name);
    if !args.yes {
        println!();
        print_script(&script);
        println!();
        if !prompt::confirm("Dispatch this script through the gateway?")? {
            println!("Aborted; nothing was dispatched.");
            return Ok(());
        }
    }

    let mut gateway =
        ShellGateway::new(&args.gateway)?.with_timeout(Duration::from_secs(args.timeout_secs));

    // The session-setup script establishes the session itself; everything
    // else needs one in place first.
    if operation != Operation::SessionSetup {
        establish_session(&config, &mut gateway)?;
    }

    let output = gateway.dispatch(&script)?;

    let action = match operation {
        Operation::RemoveEntity(_) => EventAction::Remove,
        _ => EventAction::Dispatch,
    };
    let log = EventLog::new(default_log_path(&args.config));
    log_event(
        &log,
        &Event::new(action).with_group(group_name).with_details(json!({
            "operation": args.op,
            "errors": output.errors().len(),
        })),
    );

    print_records(&output);

    if output.has_errors() {
        return Err(DialplanError::ExecutionFailed(output.errors().join("\n")));
    }

    println!("Done.");
    Ok(())
}
