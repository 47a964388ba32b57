//! Command implementations for dialplan.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command lives in its own module; shared stdin
//! prompting lives in `prompt`.
//!
//! Commands own everything the orchestrator refuses to do: previewing
//! scripts, confirming dispatches, printing results, and appending audit
//! events.

mod batch;
mod check;
mod compose_cmd;
mod holidays;
mod init;
mod names;
mod prompt;
mod run;
mod wizard;

use crate::cli::Command;
use crate::compose::Operation;
use crate::error::{DialplanError, Result};
use crate::events::{Event, EventLog};
use crate::gateway::{GatewayOutput, Record};

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init(args) => init::cmd_init(args),
        Command::Check(args) => check::cmd_check(args),
        Command::Names(args) => names::cmd_names(args),
        Command::Compose(args) => compose_cmd::cmd_compose(args),
        Command::Run(args) => run::cmd_run(args),
        Command::Wizard(args) => wizard::cmd_wizard(args),
        Command::Batch(args) => batch::cmd_batch(args),
        Command::Holidays(args) => holidays::cmd_holidays(args),
    }
}

/// Append an audit event. Best-effort: a failure prints a warning
/// instead of failing the command, so a provisioning result is never
/// misreported over a logging problem.
pub(crate) fn log_event(log: &EventLog, event: &Event) {
    if let Err(e) = log.append(event) {
        eprintln!("Warning: failed to log {} event: {}", event.action, e);
    }
}

/// Resolve an `--op` name, listing the accepted names on failure.
pub(crate) fn parse_operation(name: &str) -> Result<Operation> {
    Operation::from_str(name).ok_or_else(|| {
        DialplanError::UserError(format!(
            "unknown operation '{}' (expected one of: {})",
            name,
            Operation::NAMES.join(", ")
        ))
    })
}

/// Print a composed script with exactly one trailing newline.
pub(crate) fn print_script(script: &str) {
    print!("{}", script);
    if !script.ends_with('\n') {
        println!();
    }
}

/// Print the tagged records of a dispatch in transcript order.
pub(crate) fn print_records(output: &GatewayOutput) {
    for record in &output.records {
        match record {
            Record::Session { tenant_id, account } => {
                println!("  session: tenant {} as {}", tenant_id, account);
            }
            Record::Group { name, id, .. } => println!("  group: {} ({})", name, id),
            Record::ResourceAccount { name, upn, .. } => {
                println!("  resource account: {} <{}>", name, upn);
            }
            Record::CallQueue { name, id, .. } => println!("  call queue: {} ({})", name, id),
            Record::AutoAttendant { name, id, .. } => {
                println!("  auto attendant: {} ({})", name, id);
            }
            Record::Progress {
                index,
                total,
                group_name,
            } => println!("  [{}/{}] {}", index, total, group_name),
            Record::Success(message) => println!("  ok: {}", message),
            Record::Error(message) => println!("  ERROR: {}", message),
        }
    }
    for warning in &output.warnings {
        println!("  Warning: {}", warning);
    }
}
