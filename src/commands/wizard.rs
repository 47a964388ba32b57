//! Implementation of the `dialplan wizard` command.
//!
//! Walks the fixed provisioning sequence for one customer group, one step
//! at a time: preview the script, confirm, dispatch, show the tagged
//! results. Failed steps can be retried or skipped; quitting leaves every
//! remaining step untouched.
//!
//! `--yes` dispatches straight through and aborts on the first failure.
//! `--dry-run` prints every script without creating a gateway; no audit
//! events are written.

use super::prompt::{FailureChoice, StepChoice};
use super::{log_event, print_records, print_script, prompt};
use crate::cli::WizardArgs;
use crate::config::ProvisionConfig;
use crate::error::Result;
use crate::events::{default_log_path, Event, EventAction, EventLog};
use crate::gateway::ShellGateway;
use crate::orchestrator::{StepKind, StepStatus, WizardPlan};
use serde_json::json;
use std::time::Duration;

/// Execute the `dialplan wizard` command.
pub(super) fn cmd_wizard(args: WizardArgs) -> Result<()> {
    let config = ProvisionConfig::load(&args.config)?;
    config.validate()?;

    let mut plan = WizardPlan::new(config);

    if args.dry_run {
        return dry_run(&plan);
    }

    let mut gateway =
        ShellGateway::new(&args.gateway)?.with_timeout(Duration::from_secs(args.timeout_secs));
    let log = EventLog::new(default_log_path(&args.config));
    let group_name = plan.config().derived_names().group_name;
    let total = plan.steps().len();

    log_event(
        &log,
        &Event::new(EventAction::WizardStart)
            .with_group(group_name.clone())
            .with_details(json!({
                "config": args.config.display().to_string(),
                "steps": total,
            })),
    );

    let mut aborted = false;

    loop {
        let Some((ordinal, title, status, kind)) = plan
            .current()
            .map(|step| (step.ordinal, step.title, step.status, step.kind))
        else {
            break;
        };

        if status == StepStatus::Failed {
            match prompt::failure_choice()? {
                FailureChoice::Retry => {
                    plan.retry(ordinal)?;
                    log_event(
                        &log,
                        &Event::new(EventAction::StepRetry)
                            .with_group(group_name.clone())
                            .with_details(json!({ "step": ordinal, "title": title })),
                    );
                }
                FailureChoice::Skip => {
                    // Skipping a failed step is retry then skip.
                    plan.retry(ordinal)?;
                    plan.skip(ordinal)?;
                    log_event(
                        &log,
                        &Event::new(EventAction::StepSkip)
                            .with_group(group_name.clone())
                            .with_details(json!({ "step": ordinal, "title": title })),
                    );
                    println!("Skipped step {}.", ordinal);
                }
                FailureChoice::Quit => {
                    aborted = true;
                    break;
                }
            }
            continue;
        }

        println!();
        println!("Step {}/{}: {}", ordinal, total, title);

        match kind {
            StepKind::Checkpoint => {
                if ordinal == 1 {
                    print_review(plan.config());
                }
                if !args.yes && !prompt::confirm("Continue?")? {
                    aborted = true;
                    break;
                }
                plan.acknowledge(ordinal)?;
            }
            StepKind::Scripted(_) => {
                let choice = if args.yes {
                    StepChoice::Dispatch
                } else {
                    if let Some(script) = plan.preview(ordinal)? {
                        println!();
                        print_script(&script);
                        println!();
                    }
                    prompt::step_choice()?
                };

                match choice {
                    StepChoice::Dispatch => match plan.dispatch_step(ordinal, &mut gateway) {
                        Ok(output) => {
                            print_records(&output);
                            log_event(
                                &log,
                                &Event::new(EventAction::StepComplete)
                                    .with_group(group_name.clone())
                                    .with_details(json!({ "step": ordinal, "title": title })),
                            );
                            println!("Step {} completed.", ordinal);
                        }
                        Err(e) => {
                            let failed = plan.step(ordinal).map(|step| step.status)
                                == Some(StepStatus::Failed);
                            if !failed {
                                // Nothing ran: composition or session
                                // precondition problems are fatal.
                                return Err(e);
                            }
                            log_event(
                                &log,
                                &Event::new(EventAction::StepFail)
                                    .with_group(group_name.clone())
                                    .with_details(json!({
                                        "step": ordinal,
                                        "title": title,
                                        "error": e.to_string(),
                                    })),
                            );
                            eprintln!("Step {} failed: {}", ordinal, e);
                            if args.yes {
                                return Err(e);
                            }
                        }
                    },
                    StepChoice::Skip => {
                        plan.skip(ordinal)?;
                        log_event(
                            &log,
                            &Event::new(EventAction::StepSkip)
                                .with_group(group_name.clone())
                                .with_details(json!({ "step": ordinal, "title": title })),
                        );
                        println!("Skipped step {}.", ordinal);
                    }
                    StepChoice::Quit => {
                        aborted = true;
                        break;
                    }
                }
            }
        }
    }

    let completed = count_status(&plan, StepStatus::Completed);
    let skipped = count_status(&plan, StepStatus::Skipped);

    log_event(
        &log,
        &Event::new(EventAction::WizardFinish)
            .with_group(group_name)
            .with_details(json!({
                "completed": completed,
                "skipped": skipped,
                "aborted": aborted,
            })),
    );

    println!();
    if aborted {
        println!(
            "Wizard aborted after {} of {} steps; nothing else was dispatched.",
            completed, total
        );
    } else {
        println!(
            "Provisioning finished: {} step(s) completed, {} skipped.",
            completed, skipped
        );
    }

    Ok(())
}

fn dry_run(plan: &WizardPlan) -> Result<()> {
    let total = plan.steps().len();
    for step in plan.steps() {
        println!();
        println!("Step {}/{}: {}", step.ordinal, total, step.title);
        match plan.preview(step.ordinal)? {
            Some(script) => {
                println!();
                print_script(&script);
            }
            None => println!("  (checkpoint, nothing to dispatch)"),
        }
    }
    Ok(())
}

fn print_review(config: &ProvisionConfig) {
    let names = config.derived_names();
    println!();
    println!("  Customer:       {}", config.customer);
    println!("  Group:          {}", config.customer_group_name);
    println!("  Phone number:   {}", config.phone_number);
    println!("  Language:       {}", config.language_id);
    println!("  Time zone:      {}", config.time_zone_id);
    println!();
    println!("  Will provision:");
    println!("    {}", names.group_name);
    println!(
        "    {} <{}>",
        names.call_queue_name, names.call_queue_account_upn
    );
    println!(
        "    {} <{}>",
        names.auto_attendant_name, names.auto_attendant_account_upn
    );
    println!();
}

fn count_status(plan: &WizardPlan, status: StepStatus) -> usize {
    plan.steps()
        .iter()
        .filter(|step| step.status == status)
        .count()
}
