//! Guided single-group provisioning plan.

use super::{StepKind, StepStatus, WorkflowStep, PROVISION_SEQUENCE};
use crate::compose::compose;
use crate::config::ProvisionConfig;
use crate::error::{DialplanError, Result};
use crate::gateway::{ExecutionGateway, GatewayOutput};

/// The guided wizard plan: the fixed provisioning sequence for one
/// customer group, bracketed by a review checkpoint and a finish
/// checkpoint.
///
/// The plan owns the config and all step state. Dispatching a step
/// regenerates its script from the current config, so edits applied via
/// [`replace_config`](WizardPlan::replace_config) mid-run affect every
/// step that has not run yet.
#[derive(Debug)]
pub struct WizardPlan {
    config: ProvisionConfig,
    steps: Vec<WorkflowStep>,
}

impl WizardPlan {
    pub fn new(config: ProvisionConfig) -> Self {
        WizardPlan {
            config,
            steps: build_steps(),
        }
    }

    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    /// Swap in an edited config. Steps keep their state; scripts for
    /// steps dispatched after this point derive from the new config.
    pub fn replace_config(&mut self, config: ProvisionConfig) {
        self.config = config;
    }

    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    pub fn step(&self, ordinal: usize) -> Option<&WorkflowStep> {
        self.steps.get(ordinal.checked_sub(1)?)
    }

    /// The first step that still needs operator attention (pending or
    /// failed), if any.
    pub fn current(&self) -> Option<&WorkflowStep> {
        self.steps
            .iter()
            .find(|step| matches!(step.status, StepStatus::Pending | StepStatus::Failed))
    }

    /// True once every step is completed or skipped.
    pub fn is_complete(&self) -> bool {
        self.steps
            .iter()
            .all(|step| matches!(step.status, StepStatus::Completed | StepStatus::Skipped))
    }

    /// Compose the script a dispatch of this step would run right now.
    ///
    /// Checkpoints have no script and return `None`. The text is
    /// regenerated on every call; it is a preview, not a cache.
    pub fn preview(&self, ordinal: usize) -> Result<Option<String>> {
        let step = self.require_step(ordinal)?;
        match step.kind {
            StepKind::Checkpoint => Ok(None),
            StepKind::Scripted(operation) => Ok(Some(compose(&self.config, operation)?)),
        }
    }

    /// Dispatch one pending scripted step through the gateway.
    ///
    /// The session precondition is checked (and the session established)
    /// first. A composition failure leaves the step pending with zero
    /// side effects. A gateway failure marks the step failed without
    /// output. Output containing ERROR records marks the step failed,
    /// stores the output, and surfaces the error lines as
    /// `ExecutionFailed`. Otherwise the step completes and the output is
    /// returned.
    pub fn dispatch_step(
        &mut self,
        ordinal: usize,
        gateway: &mut dyn ExecutionGateway,
    ) -> Result<GatewayOutput> {
        let step = self.require_step(ordinal)?;

        let operation = match step.kind {
            StepKind::Checkpoint => {
                return Err(DialplanError::UserError(format!(
                    "step {} '{}' is a checkpoint and has no script to dispatch",
                    step.ordinal, step.title
                )));
            }
            StepKind::Scripted(operation) => operation,
        };

        if step.status != StepStatus::Pending {
            return Err(DialplanError::UserError(format!(
                "step {} '{}' is {}; only pending steps can be dispatched",
                step.ordinal, step.title, step.status
            )));
        }

        // No side effects yet: a failure up to here leaves the step pending.
        super::establish_session(&self.config, gateway)?;
        let script = compose(&self.config, operation)?;

        let index = ordinal - 1;
        let output = match gateway.dispatch(&script) {
            Ok(output) => output,
            Err(e) => {
                self.steps[index].status = StepStatus::Failed;
                return Err(e);
            }
        };

        self.steps[index].result = Some(output.clone());

        if output.has_errors() {
            self.steps[index].status = StepStatus::Failed;
            return Err(DialplanError::ExecutionFailed(output.errors().join("\n")));
        }

        self.steps[index].status = StepStatus::Completed;
        Ok(output)
    }

    /// Complete a pending checkpoint step.
    pub fn acknowledge(&mut self, ordinal: usize) -> Result<()> {
        let step = self.require_step(ordinal)?;

        if step.kind != StepKind::Checkpoint {
            return Err(DialplanError::UserError(format!(
                "step {} '{}' is not a checkpoint; dispatch it instead",
                step.ordinal, step.title
            )));
        }
        if step.status != StepStatus::Pending {
            return Err(DialplanError::UserError(format!(
                "step {} '{}' is {}; only pending checkpoints can be acknowledged",
                step.ordinal, step.title, step.status
            )));
        }

        self.steps[ordinal - 1].status = StepStatus::Completed;
        Ok(())
    }

    /// Skip a pending step. Skipped is terminal for the run.
    pub fn skip(&mut self, ordinal: usize) -> Result<()> {
        let step = self.require_step(ordinal)?;

        if step.status != StepStatus::Pending {
            return Err(DialplanError::UserError(format!(
                "step {} '{}' is {}; only pending steps can be skipped",
                step.ordinal, step.title, step.status
            )));
        }

        self.steps[ordinal - 1].status = StepStatus::Skipped;
        Ok(())
    }

    /// Move a failed step back to pending for another attempt.
    pub fn retry(&mut self, ordinal: usize) -> Result<()> {
        let step = self.require_step(ordinal)?;

        if step.status != StepStatus::Failed {
            return Err(DialplanError::UserError(format!(
                "step {} '{}' is {}; only failed steps can be retried",
                step.ordinal, step.title, step.status
            )));
        }

        self.steps[ordinal - 1].status = StepStatus::Pending;
        Ok(())
    }

    /// Rebuild every step as pending, discarding all results.
    pub fn reset(&mut self) {
        self.steps = build_steps();
    }

    fn require_step(&self, ordinal: usize) -> Result<&WorkflowStep> {
        self.step(ordinal).ok_or_else(|| {
            DialplanError::UserError(format!(
                "no step {} in the plan (steps are numbered 1 to {})",
                ordinal,
                self.steps.len()
            ))
        })
    }
}

fn build_steps() -> Vec<WorkflowStep> {
    let mut steps = Vec::with_capacity(PROVISION_SEQUENCE.len() + 2);

    steps.push(WorkflowStep::new(1, "Review configuration", StepKind::Checkpoint));
    for (title, operation) in PROVISION_SEQUENCE {
        steps.push(WorkflowStep::new(
            steps.len() + 1,
            title,
            StepKind::Scripted(*operation),
        ));
    }
    steps.push(WorkflowStep::new(steps.len() + 1, "Finish", StepKind::Checkpoint));

    steps
}
