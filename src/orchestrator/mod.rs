//! Workflow orchestration for provisioning runs.
//!
//! Two run shapes share the same fixed operation sequence:
//! - [`WizardPlan`]: one customer group, one step at a time, with a
//!   confirm gate and per-step retry/skip.
//! - [`BatchPlan`]: many customer groups from a batch import, combined
//!   into one script and dispatched as a single unit.
//!
//! The orchestrator owns step state and session preconditions; it never
//! prompts. Previewing, confirming, and displaying results belong to the
//! command layer, which also writes the audit events for each transition.
//! Scripts are regenerated from the plan's current config immediately
//! before dispatch, never cached.

mod batch;
mod wizard;

#[cfg(test)]
mod tests;

pub use batch::BatchPlan;
pub use wizard::WizardPlan;

use crate::compose::{compose, AccountKind, Operation};
use crate::config::ProvisionConfig;
use crate::error::{DialplanError, Result};
use crate::gateway::{ExecutionGateway, GatewayOutput, SessionState};

/// The scripted provisioning sequence for one customer group, in
/// dependency order. The wizard runs it step by step; batch mode embeds
/// it once per config.
pub const PROVISION_SEQUENCE: &[(&str, Operation)] = &[
    ("Create Microsoft 365 group", Operation::CreateGroup),
    (
        "Create call queue resource account",
        Operation::CreateResourceAccount(AccountKind::CallQueue),
    ),
    (
        "Assign call queue license",
        Operation::AssignLicense(AccountKind::CallQueue),
    ),
    ("Create call queue", Operation::CreateCallQueue),
    (
        "Create auto attendant resource account",
        Operation::CreateResourceAccount(AccountKind::AutoAttendant),
    ),
    (
        "Assign auto attendant license and phone number",
        Operation::AssignLicenseAndPhone,
    ),
    ("Create auto attendant", Operation::CreateAutoAttendant),
    ("Associate resource accounts", Operation::AssociateAccounts),
];

/// Status of a workflow step.
///
/// Transitions: Pending moves to Completed, Failed, or Skipped. Failed
/// moves back to Pending through an explicit retry. Completed and Skipped
/// are terminal for the run; only a plan reset revives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Completed,
    Failed,
    Skipped,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Pending => write!(f, "pending"),
            StepStatus::Completed => write!(f, "completed"),
            StepStatus::Failed => write!(f, "failed"),
            StepStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// What a workflow step does when dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Unscripted checkpoint the operator acknowledges (review, finish).
    Checkpoint,
    /// A provisioning operation whose script goes through the gateway.
    Scripted(Operation),
}

/// One step of a wizard run.
///
/// Steps are created at plan init, mutated only by the plan, and
/// destroyed only on plan reset. `result` holds the gateway output of the
/// last dispatch verbatim.
#[derive(Debug, Clone)]
pub struct WorkflowStep {
    /// 1-based position shown to the operator.
    pub ordinal: usize,

    /// Operator-facing step title.
    pub title: &'static str,

    pub kind: StepKind,

    pub status: StepStatus,

    /// Output of the last dispatch of this step, if any.
    pub result: Option<GatewayOutput>,
}

impl WorkflowStep {
    fn new(ordinal: usize, title: &'static str, kind: StepKind) -> Self {
        WorkflowStep {
            ordinal,
            title,
            kind,
            status: StepStatus::Pending,
            result: None,
        }
    }
}

/// Make sure the gateway session is ready, connecting if necessary.
///
/// A `Ready` session is left untouched. Otherwise the session-setup script
/// is dispatched once; if the gateway still does not report `Ready` after
/// that, the precondition cannot be met and `SessionExpired` is returned.
/// ERROR records from the setup script surface as `ExecutionFailed`.
pub fn establish_session(
    config: &ProvisionConfig,
    gateway: &mut dyn ExecutionGateway,
) -> Result<()> {
    if gateway.session() == SessionState::Ready {
        return Ok(());
    }

    let script = compose(config, Operation::SessionSetup)?;
    let output = gateway.dispatch(&script)?;

    if output.has_errors() {
        return Err(DialplanError::ExecutionFailed(output.errors().join("\n")));
    }

    if gateway.session() != SessionState::Ready {
        return Err(DialplanError::SessionExpired);
    }

    Ok(())
}
