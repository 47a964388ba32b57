//! Tests for the wizard and batch plans.

use crate::error::DialplanError;
use crate::gateway::{Record, SessionState};
use crate::orchestrator::{
    establish_session, BatchPlan, StepKind, StepStatus, WizardPlan, PROVISION_SEQUENCE,
};
use crate::test_support::{sample_config, sample_config_for, ScriptedGateway};

const SESSION_OUTPUT: &str = "SESSION:11111111-2222-3333-4444-555555555555|admin@contoso.com";

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn test_plan_steps_are_fixed_and_ordered() {
    let plan = WizardPlan::new(sample_config());
    let steps = plan.steps();

    assert_eq!(steps.len(), PROVISION_SEQUENCE.len() + 2);
    assert_eq!(steps.len(), 10);

    assert_eq!(steps[0].title, "Review configuration");
    assert_eq!(steps[0].kind, StepKind::Checkpoint);
    assert_eq!(steps[9].title, "Finish");
    assert_eq!(steps[9].kind, StepKind::Checkpoint);

    assert_eq!(steps[1].title, "Create Microsoft 365 group");
    assert_eq!(steps[4].title, "Create call queue");
    assert_eq!(steps[8].title, "Associate resource accounts");

    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step.ordinal, i + 1);
        assert_eq!(step.status, StepStatus::Pending);
        assert!(step.result.is_none());
    }
}

#[test]
fn test_preview_is_none_for_checkpoints_and_scripted_otherwise() {
    let plan = WizardPlan::new(sample_config());

    assert!(plan.preview(1).unwrap().is_none());
    assert!(plan.preview(10).unwrap().is_none());

    let script = plan.preview(2).unwrap().unwrap();
    assert!(script.contains("Get-MgGroup -Filter"));
    assert!(script.contains("grp-acm-luc"));
}

#[test]
fn test_preview_regenerates_from_replaced_config() {
    let mut plan = WizardPlan::new(sample_config());
    assert!(plan.preview(2).unwrap().unwrap().contains("grp-acm-luc"));

    plan.replace_config(sample_config_for("zrh"));

    assert!(plan.preview(2).unwrap().unwrap().contains("grp-acm-zrh"));
    assert_eq!(plan.steps()[1].status, StepStatus::Pending);
}

#[test]
fn test_unknown_ordinal_is_rejected() {
    let plan = WizardPlan::new(sample_config());
    let err = plan.preview(11).unwrap_err();
    assert!(err.to_string().contains("numbered 1 to 10"));
}

#[test]
fn test_acknowledge_completes_a_checkpoint() {
    let mut plan = WizardPlan::new(sample_config());

    plan.acknowledge(1).unwrap();
    assert_eq!(plan.steps()[0].status, StepStatus::Completed);

    // Scripted steps cannot be acknowledged away
    let err = plan.acknowledge(2).unwrap_err();
    assert!(err.to_string().contains("not a checkpoint"));

    // And a completed checkpoint stays completed
    let err = plan.acknowledge(1).unwrap_err();
    assert!(err.to_string().contains("completed"));
}

#[test]
fn test_dispatch_step_establishes_session_then_completes() {
    let mut plan = WizardPlan::new(sample_config());
    let mut gateway = ScriptedGateway::new();
    gateway.push_output(SESSION_OUTPUT);
    gateway.push_output("GROUP:grp-acm-luc|42|grp-acm-luc|Call group");

    let output = plan.dispatch_step(2, &mut gateway).unwrap();

    // First dispatch is the session setup, second is the step itself
    assert_eq!(gateway.dispatched.len(), 2);
    assert!(gateway.dispatched[0].contains("Import-Module MicrosoftTeams"));
    assert!(gateway.dispatched[1].contains("Get-MgGroup -Filter"));

    assert!(matches!(output.records[0], Record::Group { .. }));
    let step = plan.step(2).unwrap();
    assert_eq!(step.status, StepStatus::Completed);
    assert!(step.result.is_some());
}

#[test]
fn test_session_is_established_once_for_consecutive_steps() {
    let mut plan = WizardPlan::new(sample_config());
    let mut gateway = ScriptedGateway::new();
    gateway.push_output(SESSION_OUTPUT);

    plan.dispatch_step(2, &mut gateway).unwrap();
    plan.dispatch_step(3, &mut gateway).unwrap();

    // session + step 2 + step 3
    assert_eq!(gateway.dispatched.len(), 3);
    assert_eq!(gateway.session, SessionState::Ready);
}

#[test]
fn test_dispatch_step_with_error_output_fails_the_step() {
    let mut plan = WizardPlan::new(sample_config());
    let mut gateway = ScriptedGateway::ready();
    gateway.push_output("ERROR:create group failed: Insufficient privileges");

    let err = plan.dispatch_step(2, &mut gateway).unwrap_err();
    assert!(matches!(err, DialplanError::ExecutionFailed(_)));
    assert!(err.to_string().contains("Insufficient privileges"));

    let step = plan.step(2).unwrap();
    assert_eq!(step.status, StepStatus::Failed);
    // The offending output is kept for inspection
    assert!(step.result.as_ref().unwrap().has_errors());
}

#[test]
fn test_failed_step_can_be_retried_and_completed() {
    let mut plan = WizardPlan::new(sample_config());
    let mut gateway = ScriptedGateway::ready();
    gateway.push_output("ERROR:create group failed: throttled");

    assert!(plan.dispatch_step(2, &mut gateway).is_err());
    assert_eq!(plan.step(2).unwrap().status, StepStatus::Failed);

    plan.retry(2).unwrap();
    assert_eq!(plan.step(2).unwrap().status, StepStatus::Pending);

    gateway.push_output("GROUP:grp-acm-luc|42|grp-acm-luc|Call group");
    plan.dispatch_step(2, &mut gateway).unwrap();
    assert_eq!(plan.step(2).unwrap().status, StepStatus::Completed);
}

#[test]
fn test_retry_requires_a_failed_step() {
    let mut plan = WizardPlan::new(sample_config());
    let err = plan.retry(2).unwrap_err();
    assert!(err.to_string().contains("only failed steps"));
}

#[test]
fn test_gateway_failure_marks_the_step_failed_without_output() {
    let mut plan = WizardPlan::new(sample_config());
    let mut gateway = ScriptedGateway::ready();
    gateway.gateway_error = Some("pwsh not found".to_string());

    let err = plan.dispatch_step(2, &mut gateway).unwrap_err();
    assert!(matches!(err, DialplanError::Gateway(_)));

    let step = plan.step(2).unwrap();
    assert_eq!(step.status, StepStatus::Failed);
    assert!(step.result.is_none());
}

#[test]
fn test_session_failure_leaves_the_step_pending() {
    let mut plan = WizardPlan::new(sample_config());
    let mut gateway = ScriptedGateway::new();
    // Setup runs but never yields a SESSION record, so the session
    // precondition cannot be met.
    gateway.push_output("SUCCESS:connected");

    let err = plan.dispatch_step(2, &mut gateway).unwrap_err();
    assert!(matches!(err, DialplanError::SessionExpired));
    assert_eq!(plan.step(2).unwrap().status, StepStatus::Pending);
}

#[test]
fn test_dispatch_refuses_checkpoints_and_non_pending_steps() {
    let mut plan = WizardPlan::new(sample_config());
    let mut gateway = ScriptedGateway::ready();

    let err = plan.dispatch_step(1, &mut gateway).unwrap_err();
    assert!(err.to_string().contains("checkpoint"));

    gateway.push_output("GROUP:grp-acm-luc|42|grp-acm-luc|Call group");
    plan.dispatch_step(2, &mut gateway).unwrap();
    let err = plan.dispatch_step(2, &mut gateway).unwrap_err();
    assert!(err.to_string().contains("only pending steps"));
}

#[test]
fn test_skip_is_terminal_for_the_run() {
    let mut plan = WizardPlan::new(sample_config());
    let mut gateway = ScriptedGateway::ready();

    plan.skip(2).unwrap();
    assert_eq!(plan.step(2).unwrap().status, StepStatus::Skipped);

    let err = plan.dispatch_step(2, &mut gateway).unwrap_err();
    assert!(err.to_string().contains("skipped"));
    let err = plan.skip(2).unwrap_err();
    assert!(err.to_string().contains("only pending steps"));
}

#[test]
fn test_current_walks_the_plan_and_is_complete_at_the_end() {
    let mut plan = WizardPlan::new(sample_config());
    let mut gateway = ScriptedGateway::ready();

    assert_eq!(plan.current().unwrap().ordinal, 1);
    plan.acknowledge(1).unwrap();
    assert_eq!(plan.current().unwrap().ordinal, 2);

    for ordinal in 2..=9 {
        plan.dispatch_step(ordinal, &mut gateway).unwrap();
    }
    assert_eq!(plan.current().unwrap().ordinal, 10);
    assert!(!plan.is_complete());

    plan.acknowledge(10).unwrap();
    assert!(plan.current().is_none());
    assert!(plan.is_complete());
}

#[test]
fn test_failed_step_blocks_current_until_resolved() {
    let mut plan = WizardPlan::new(sample_config());
    let mut gateway = ScriptedGateway::ready();

    plan.acknowledge(1).unwrap();
    gateway.push_output("ERROR:create group failed: throttled");
    assert!(plan.dispatch_step(2, &mut gateway).is_err());

    // The failed step stays current until retried or skipped
    assert_eq!(plan.current().unwrap().ordinal, 2);
    plan.retry(2).unwrap();
    plan.skip(2).unwrap();
    assert_eq!(plan.current().unwrap().ordinal, 3);
}

#[test]
fn test_reset_rebuilds_every_step() {
    let mut plan = WizardPlan::new(sample_config());
    let mut gateway = ScriptedGateway::ready();

    plan.acknowledge(1).unwrap();
    gateway.push_output("GROUP:grp-acm-luc|42|grp-acm-luc|Call group");
    plan.dispatch_step(2, &mut gateway).unwrap();
    plan.skip(3).unwrap();

    plan.reset();

    assert_eq!(plan.steps().len(), 10);
    for step in plan.steps() {
        assert_eq!(step.status, StepStatus::Pending);
        assert!(step.result.is_none());
    }
}

#[test]
fn test_establish_session_is_a_noop_when_ready() {
    let mut gateway = ScriptedGateway::ready();
    establish_session(&sample_config(), &mut gateway).unwrap();
    assert!(gateway.dispatched.is_empty());
}

#[test]
fn test_establish_session_surfaces_setup_errors() {
    let mut gateway = ScriptedGateway::new();
    gateway.push_output("ERROR:session setup failed: MFA required");

    let err = establish_session(&sample_config(), &mut gateway).unwrap_err();
    assert!(matches!(err, DialplanError::ExecutionFailed(_)));
    assert!(err.to_string().contains("MFA required"));
}

#[test]
fn test_combined_script_has_one_session_and_per_config_sequences() {
    let plan = BatchPlan::new(vec![
        sample_config_for("luc"),
        sample_config_for("zrh"),
        sample_config_for("bsl"),
    ]);

    let script = plan.combined_script().unwrap();

    assert_eq!(count(&script, "Import-Module MicrosoftTeams"), 1);
    // One group idempotency check per config
    assert_eq!(count(&script, "New-MgGroup -DisplayName"), 3);
    assert_eq!(count(&script, "New-CsCallQueue"), 3);
    assert_eq!(count(&script, "New-CsAutoAttendant "), 3);

    assert!(script.contains("Write-Output 'PROGRESS:1/3|grp-acm-luc'"));
    assert!(script.contains("Write-Output 'PROGRESS:2/3|grp-acm-zrh'"));
    assert!(script.contains("Write-Output 'PROGRESS:3/3|grp-acm-bsl'"));
}

#[test]
fn test_combined_script_keeps_input_order() {
    let plan = BatchPlan::new(vec![sample_config_for("luc"), sample_config_for("zrh")]);
    let script = plan.combined_script().unwrap();

    let session = script.find("Import-Module MicrosoftTeams").unwrap();
    let marker_one = script.find("PROGRESS:1/2|grp-acm-luc").unwrap();
    let group_one = script.find("$groupName = 'grp-acm-luc'").unwrap();
    let marker_two = script.find("PROGRESS:2/2|grp-acm-zrh").unwrap();
    let group_two = script.find("$groupName = 'grp-acm-zrh'").unwrap();

    assert!(session < marker_one);
    assert!(marker_one < group_one);
    assert!(group_one < marker_two);
    assert!(marker_two < group_two);
}

#[test]
fn test_empty_batch_is_rejected() {
    let plan = BatchPlan::new(Vec::new());
    let err = plan.combined_script().unwrap_err();
    assert!(err.to_string().contains("no rows"));
}

#[test]
fn test_batch_composition_fails_closed_on_bad_identifiers() {
    let mut bad = sample_config_for("zrh");
    bad.customer = "acm;Remove-Item".to_string();

    let plan = BatchPlan::new(vec![sample_config_for("luc"), bad]);
    let err = plan.combined_script().unwrap_err();
    assert!(matches!(err, DialplanError::Validation(_)));
}

#[test]
fn test_batch_dispatch_is_a_single_gateway_call() {
    let plan = BatchPlan::new(vec![sample_config_for("luc"), sample_config_for("zrh")]);
    let mut gateway = ScriptedGateway::new();
    gateway.push_output(
        "SESSION:11111111-2222-3333-4444-555555555555|admin@contoso.com\n\
         PROGRESS:1/2|grp-acm-luc\n\
         SUCCESS:associated call queue account\n\
         PROGRESS:2/2|grp-acm-zrh\n\
         ERROR:create call queue failed: duplicate name",
    );

    let output = plan.dispatch(&mut gateway).unwrap();

    assert_eq!(gateway.dispatched.len(), 1);
    assert!(output.has_errors());
    let progress: Vec<_> = output
        .records
        .iter()
        .filter(|r| matches!(r, Record::Progress { .. }))
        .collect();
    assert_eq!(progress.len(), 2);
    // The embedded session fragment established the session as a side effect
    assert_eq!(gateway.session, SessionState::Ready);
}
