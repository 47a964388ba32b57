//! Error types for the dialplan CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for dialplan operations.
///
/// Each variant maps to a specific exit code so scripted callers can tell
/// bad input apart from backend failures.
#[derive(Error, Debug)]
pub enum DialplanError {
    /// User provided invalid arguments or the system is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// An identifier or required field failed validation before composition.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The execution gateway could not be reached or run (spawn, IO, timeout).
    #[error("Gateway failure: {0}")]
    Gateway(String),

    /// The gateway ran the script but its output contained ERROR markers.
    /// Carries the offending output verbatim; never retried automatically.
    #[error("Execution failed:\n{0}")]
    ExecutionFailed(String),

    /// The gateway session is stale; dispatch was refused before any side effect.
    #[error("Gateway session expired; reconnect before dispatching")]
    SessionExpired,
}

impl DialplanError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DialplanError::UserError(_) => exit_codes::USER_ERROR,
            DialplanError::Validation(_) => exit_codes::VALIDATION_FAILURE,
            DialplanError::Gateway(_) => exit_codes::GATEWAY_FAILURE,
            DialplanError::ExecutionFailed(_) => exit_codes::EXECUTION_FAILURE,
            DialplanError::SessionExpired => exit_codes::SESSION_EXPIRED,
        }
    }
}

/// Result type alias for dialplan operations.
pub type Result<T> = std::result::Result<T, DialplanError>;
