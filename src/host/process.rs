//! Process invocation
//!
//! The discovery core only ever talks to pixi through [`ProcessRunner`], so
//! tests can substitute a scripted runner for the real executable.

use crate::error::{DiscoverError, DiscoverResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Options for a single invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOptions {
    /// Treat any output on stderr as a failure
    pub throw_on_stderr: bool,
    /// Kill the process and fail after this long
    pub timeout: Duration,
}

impl ExecOptions {
    /// Tolerates stderr noise such as deprecation warnings
    pub fn tolerant(timeout: Duration) -> Self {
        Self {
            throw_on_stderr: false,
            timeout,
        }
    }

    /// Fails when anything is written to stderr
    pub fn strict(timeout: Duration) -> Self {
        Self {
            throw_on_stderr: true,
            timeout,
        }
    }
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self::tolerant(Duration::from_secs(30))
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Whether the process exited successfully
    pub success: bool,
    /// Human-readable exit status
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    /// Build from a finished `std::process::Output`
    pub fn from_parts(status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            success: status.success(),
            status: status.to_string(),
            stdout: String::from_utf8_lossy(stdout).to_string(),
            stderr: String::from_utf8_lossy(stderr).to_string(),
        }
    }

    /// A successful exit with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            status: "exit status: 0".to_string(),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Runs external commands
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program args...` in `cwd` and capture its output.
    ///
    /// Errors on launch failure, timeout, and (with `throw_on_stderr`)
    /// stderr output. A non-zero exit is reported through
    /// [`ExecOutput::success`], not as an error.
    async fn exec(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
        options: ExecOptions,
    ) -> DiscoverResult<ExecOutput>;
}

/// Runner backed by `tokio::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    /// Create a new runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn exec(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
        options: ExecOptions,
    ) -> DiscoverResult<ExecOutput> {
        let command = command_display(program, args);
        debug!("Executing: {} (cwd {})", command, cwd.display());

        let child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(options.timeout, child).await {
            Ok(result) => result.map_err(|e| DiscoverError::command_failed(&command, e))?,
            Err(_) => {
                return Err(DiscoverError::CommandTimeout {
                    command,
                    timeout: options.timeout,
                })
            }
        };

        let output = ExecOutput::from_parts(output.status, &output.stdout, &output.stderr);

        if options.throw_on_stderr && !output.stderr.trim().is_empty() {
            return Err(DiscoverError::CommandStderr {
                command,
                stderr: output.stderr,
            });
        }

        Ok(output)
    }
}

/// Render a command line for logs and error messages
pub fn command_display(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
