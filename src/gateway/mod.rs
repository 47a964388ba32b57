//! Execution gateway.
//!
//! Composed scripts are handed to a gateway for execution; the gateway
//! returns the parsed record output. The gateway does not interpret records
//! beyond session tracking: deciding whether an `ERROR:` record fails a
//! workflow step is the orchestrator's call.

mod records;
mod shell;


pub use records::{GatewayOutput, Record};
pub use shell::{
    ShellGateway, DEFAULT_DISPATCH_TIMEOUT_SECS, DEFAULT_GATEWAY_COMMAND, DEFAULT_SESSION_TTL_SECS,
};

use crate::error::Result;

/// Lifecycle of the provisioning session behind the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been established yet.
    Disconnected,
    /// A session probe succeeded recently enough to dispatch against.
    Ready,
    /// The last session outlived its time budget.
    Expired,
}

pub trait ExecutionGateway {
    /// Runs a script and parses its tagged output.
    ///
    /// Returns `DialplanError::Gateway` when the script could not be run to
    /// completion (spawn failure, timeout, nonzero exit). A script that ran
    /// and reported `ERROR:` records still dispatches successfully.
    fn dispatch(&mut self, script: &str) -> Result<GatewayOutput>;

    /// Session state as of now.
    fn session(&self) -> SessionState;
}
