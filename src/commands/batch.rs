//! Implementation of the `dialplan batch` command.
//!
//! Parses a batch CSV, validates every row, composes one combined script,
//! and dispatches it as a single unit. Validation fails closed: one bad
//! row stops the whole batch before anything reaches the gateway.

use super::{log_event, print_script, prompt};
use crate::batch_input::load_batch_csv;
use crate::cli::BatchArgs;
use crate::error::{DialplanError, Result};
use crate::events::{default_log_path, Event, EventAction, EventLog};
use crate::gateway::{GatewayOutput, Record, ShellGateway};
use crate::orchestrator::BatchPlan;
use serde_json::json;
use std::time::Duration;

/// Execute the `dialplan batch` command.
pub(super) fn cmd_batch(args: BatchArgs) -> Result<()> {
    let parsed = load_batch_csv(&args.input)?;

    for warning in &parsed.warnings {
        eprintln!("Warning: {}", warning);
    }

    if parsed.configs.is_empty() {
        return Err(DialplanError::UserError(format!(
            "batch file '{}' contains no usable rows",
            args.input.display()
        )));
    }

    let mut findings_total = 0;
    for config in &parsed.configs {
        let findings = config.findings();
        if !findings.is_empty() {
            println!(
                "Findings for {} / {}:",
                config.customer, config.customer_group_name
            );
            for finding in &findings {
                println!("  - {}", finding);
            }
            findings_total += findings.len();
        }
    }
    if findings_total > 0 {
        return Err(DialplanError::Validation(format!(
            "{} finding(s) across {} batch row(s); nothing was dispatched",
            findings_total,
            parsed.configs.len()
        )));
    }

    let group_names: Vec<String> = parsed
        .configs
        .iter()
        .map(|config| config.derived_names().group_name)
        .collect();
    let plan = BatchPlan::new(parsed.configs);
    let script = plan.combined_script()?;

    if args.dry_run {
        print_script(&script);
        return Ok(());
    }

    println!("Batch of {} group(s):", plan.len());
    for name in &group_names {
        println!("  {}", name);
    }
    println!();
    println!(
        "Combined script: {} lines, dispatched as one unit.",
        script.lines().count()
    );

    if !args.yes && !prompt::confirm("Dispatch the combined script through the gateway?")? {
        println!("Aborted; nothing was dispatched.");
        return Ok(());
    }

    let log = EventLog::new(default_log_path(&args.input));
    log_event(
        &log,
        &Event::new(EventAction::BatchStart).with_details(json!({
            "input": args.input.display().to_string(),
            "groups": plan.len(),
            "skipped_rows": parsed.warnings.len(),
        })),
    );

    let mut gateway =
        ShellGateway::new(&args.gateway)?.with_timeout(Duration::from_secs(args.timeout_secs));

    let output = plan.dispatch(&mut gateway)?;

    print_batch_report(&group_names, &output);

    log_event(
        &log,
        &Event::new(EventAction::BatchFinish).with_details(json!({
            "groups": plan.len(),
            "errors": output.errors().len(),
        })),
    );

    if output.has_errors() {
        return Err(DialplanError::ExecutionFailed(output.errors().join("\n")));
    }

    println!();
    println!("Batch finished: all {} group(s) provisioned.", plan.len());
    Ok(())
}

/// Per-group outcome table, reconstructed from the PROGRESS markers.
///
/// ERROR records before the first marker belong to session setup; a group
/// without a marker was never reached.
fn print_batch_report(expected: &[String], output: &GatewayOutput) {
    let mut session_errors = 0usize;
    let mut reached: Vec<(String, usize)> = Vec::new();

    for record in &output.records {
        match record {
            Record::Progress { group_name, .. } => reached.push((group_name.clone(), 0)),
            Record::Error(_) => match reached.last_mut() {
                Some(entry) => entry.1 += 1,
                None => session_errors += 1,
            },
            _ => {}
        }
    }

    println!();
    println!("Batch report:");
    if session_errors > 0 {
        println!("  session setup: {} error(s)", session_errors);
    }
    for (index, name) in expected.iter().enumerate() {
        match reached.get(index) {
            Some((marker_name, 0)) => println!("  {}: ok", marker_name),
            Some((marker_name, errors)) => println!("  {}: {} error(s)", marker_name, errors),
            None => println!("  {}: not reached", name),
        }
    }
}
