//! Audit event logging.
//!
//! Every state-changing command appends events to an NDJSON log (one JSON
//! object per line) so provisioning runs can be reconstructed after the
//! fact: who ran which operation against which customer group, and how each
//! step ended.
//!
//! # Event format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: the action performed (dispatch, step_complete, ...)
//! - `actor`: the operator string (e.g. `user@HOST`)
//! - `group`: optional customer group name for group-scoped events
//! - `details`: freeform object with action-specific details
//!
//! The log lives next to the config file it describes by default
//! ([`default_log_path`]), so the audit trail travels with the config.

use crate::error::{DialplanError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the audit log.
pub const EVENTS_FILE_NAME: &str = "dialplan-events.ndjson";

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Config file scaffolded
    Init,
    /// Config validation run
    Check,
    /// Script composed for preview or file output
    Compose,
    /// Script dispatched through the gateway
    Dispatch,
    /// Wizard run started
    WizardStart,
    /// Wizard run finished
    WizardFinish,
    /// One wizard step completed
    StepComplete,
    /// One wizard step failed
    StepFail,
    /// One wizard step skipped by the operator
    StepSkip,
    /// One failed wizard step moved back to pending
    StepRetry,
    /// Batch run started
    BatchStart,
    /// Batch run finished
    BatchFinish,
    /// Removal script dispatched
    Remove,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Init => write!(f, "init"),
            EventAction::Check => write!(f, "check"),
            EventAction::Compose => write!(f, "compose"),
            EventAction::Dispatch => write!(f, "dispatch"),
            EventAction::WizardStart => write!(f, "wizard_start"),
            EventAction::WizardFinish => write!(f, "wizard_finish"),
            EventAction::StepComplete => write!(f, "step_complete"),
            EventAction::StepFail => write!(f, "step_fail"),
            EventAction::StepSkip => write!(f, "step_skip"),
            EventAction::StepRetry => write!(f, "step_retry"),
            EventAction::BatchStart => write!(f, "batch_start"),
            EventAction::BatchFinish => write!(f, "batch_finish"),
            EventAction::Remove => write!(f, "remove"),
        }
    }
}

/// An event record for the audit log.
///
/// Events are serialized as single-line JSON objects and appended to the
/// NDJSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The operator who performed the action (e.g. `user@HOST`).
    pub actor: String,

    /// Customer group name for group-scoped events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            group: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the customer group name for this event.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            DialplanError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Audit log bound to one NDJSON file.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an event as a single JSON line.
    ///
    /// The file and its parent directory are created if they don't exist.
    /// Each append results in one line with a trailing newline, synced to
    /// disk before returning.
    pub fn append(&self, event: &Event) -> Result<()> {
        let json_line = event.to_ndjson_line()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    DialplanError::UserError(format!(
                        "failed to create events directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                DialplanError::UserError(format!(
                    "failed to open events file '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        writeln!(file, "{}", json_line).map_err(|e| {
            DialplanError::UserError(format!(
                "failed to write event to '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        file.sync_all().map_err(|e| {
            DialplanError::UserError(format!(
                "failed to sync events file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

/// Default log location: next to the config file it describes.
pub fn default_log_path(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(EVENTS_FILE_NAME),
        _ => PathBuf::from(EVENTS_FILE_NAME),
    }
}
