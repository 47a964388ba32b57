//! Shell-backed execution gateway.
//!
//! Runs a configurable command line with the script path appended as the
//! final argument, captures stdout/stderr into temp files, and enforces a
//! wall-clock budget. The default command targets a local PowerShell, but
//! anything that accepts a script path works, including a wrapper that
//! forwards to a remote session host.

use super::records::GatewayOutput;
use super::{ExecutionGateway, SessionState};
use crate::error::{DialplanError, Result};
use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Command line used when none is configured.
pub const DEFAULT_GATEWAY_COMMAND: &str = "pwsh -NoProfile -NonInteractive -File";

/// Wall-clock budget for one dispatch. Batch scripts carry several
/// propagation waits per entry, so the default is generous.
pub const DEFAULT_DISPATCH_TIMEOUT_SECS: u64 = 3600;

/// How long a session stays usable after the last successful setup probe.
/// Teams session tokens live about an hour; this leaves headroom for the
/// dispatch that is about to run against it.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3000;

#[derive(Debug)]
pub struct ShellGateway {
    args: Vec<String>,
    environment: Vec<(String, String)>,
    timeout: Duration,
    session_ttl: Duration,
    session_deadline: Option<Instant>,
}

impl ShellGateway {
    /// Builds a gateway from a command line such as
    /// `pwsh -NoProfile -NonInteractive -File`.
    ///
    /// # Errors
    ///
    /// `DialplanError::UserError` when the command line cannot be split into
    /// words or is empty.
    pub fn new(command: &str) -> Result<Self> {
        let args = shell_words::split(command).map_err(|e| {
            DialplanError::UserError(format!(
                "failed to parse gateway command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                command, e
            ))
        })?;

        if args.is_empty() {
            return Err(DialplanError::UserError(format!(
                "gateway command is empty after parsing: '{}'",
                command
            )));
        }

        Ok(Self {
            args,
            environment: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_DISPATCH_TIMEOUT_SECS),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            session_deadline: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Extra environment for the gateway process, e.g. tenant selection for
    /// a wrapper script.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.environment.push((key.to_string(), value.to_string()));
        self
    }
}

impl ExecutionGateway for ShellGateway {
    fn dispatch(&mut self, script: &str) -> Result<GatewayOutput> {
        let mut script_file = tempfile::Builder::new()
            .prefix("dialplan-")
            .suffix(".ps1")
            .tempfile()
            .map_err(|e| DialplanError::Gateway(format!("failed to create script file: {}", e)))?;
        script_file
            .write_all(script.as_bytes())
            .and_then(|_| script_file.flush())
            .map_err(|e| DialplanError::Gateway(format!("failed to write script file: {}", e)))?;

        let stdout_file = tempfile::NamedTempFile::new().map_err(|e| {
            DialplanError::Gateway(format!("failed to create stdout capture: {}", e))
        })?;
        let stderr_file = tempfile::NamedTempFile::new().map_err(|e| {
            DialplanError::Gateway(format!("failed to create stderr capture: {}", e))
        })?;
        let stdout_handle = stdout_file
            .as_file()
            .try_clone()
            .map_err(|e| DialplanError::Gateway(format!("failed to clone stdout capture: {}", e)))?;
        let stderr_handle = stderr_file
            .as_file()
            .try_clone()
            .map_err(|e| DialplanError::Gateway(format!("failed to clone stderr capture: {}", e)))?;

        let mut command = Command::new(&self.args[0]);
        command
            .args(&self.args[1..])
            .arg(script_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_handle))
            .stderr(Stdio::from(stderr_handle));
        for (key, value) in &self.environment {
            command.env(key, value);
        }

        let start = Instant::now();
        let mut child = command.spawn().map_err(|e| {
            DialplanError::Gateway(format!(
                "failed to start gateway command '{}': {}\n\
                 Fix: ensure the shell is installed and in PATH.",
                self.args[0], e
            ))
        })?;

        let (exit_code, timed_out) = wait_with_timeout(&mut child, self.timeout)?;

        if timed_out {
            return Err(DialplanError::Gateway(format!(
                "gateway command timed out after {} seconds",
                self.timeout.as_secs()
            )));
        }

        let stdout = std::fs::read_to_string(stdout_file.path())
            .map_err(|e| DialplanError::Gateway(format!("failed to read gateway stdout: {}", e)))?;
        let stderr = std::fs::read_to_string(stderr_file.path())
            .map_err(|e| DialplanError::Gateway(format!("failed to read gateway stderr: {}", e)))?;

        match exit_code {
            Some(0) => {}
            Some(code) => {
                return Err(DialplanError::Gateway(format!(
                    "gateway command exited with status {}{}",
                    code,
                    stderr_excerpt(&stderr)
                )));
            }
            None => {
                return Err(DialplanError::Gateway(
                    "gateway command was terminated by a signal".to_string(),
                ));
            }
        }

        let output = GatewayOutput::parse(stdout);

        // The setup fragment prints SESSION only once every connect has
        // succeeded, so seeing it starts (or restarts) the TTL clock. ERROR
        // records elsewhere in the output, e.g. from a failed batch entry,
        // do not revoke an established session.
        if output.session_record().is_some() {
            self.session_deadline = Some(start + self.session_ttl);
        }

        Ok(output)
    }

    fn session(&self) -> SessionState {
        match self.session_deadline {
            None => SessionState::Disconnected,
            Some(deadline) if Instant::now() < deadline => SessionState::Ready,
            Some(_) => SessionState::Expired,
        }
    }
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<(Option<i32>, bool)> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(100);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return Ok((status.code(), false));
            }
            Ok(None) => {
                if start.elapsed() >= timeout {
                    kill_process(child);
                    return Ok((None, true));
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => {
                return Err(DialplanError::Gateway(format!(
                    "failed to check gateway process status: {}",
                    e
                )));
            }
        }
    }
}

/// Kill a process and wait for it to terminate.
fn kill_process(child: &mut Child) {
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

fn stderr_excerpt(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lines: Vec<&str> = trimmed.lines().collect();
    let tail = if lines.len() > 5 {
        lines[lines.len() - 5..].join("\n")
    } else {
        lines.join("\n")
    };
    format!(": {}", tail)
}
