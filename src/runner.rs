//! Subprocess seam used by the locator and the uploader.
//!
//! Everything that spawns a process goes through [`CommandRunner`], so the
//! search and upload logic can be exercised with a fake runner that never
//! touches the system. [`SystemRunner`] is the real implementation backed by
//! `tokio::process`.

use crate::detection::check_version;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Typed failure of a version probe.
///
/// None of these are fatal to the search: the locator logs them and moves on
/// to the next candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// The probe did not finish within the configured timeout.
    #[error("probe timed out")]
    Timeout,

    /// Permission denied executing the candidate.
    #[error("permission denied")]
    PermissionDenied,

    /// The process could not be started (typically: no such command).
    #[error("failed to launch")]
    LaunchFailed,

    /// The process ran but exited unsuccessfully.
    #[error("exited with code {code:?}")]
    NonZeroExit {
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
    },
}

impl ProbeError {
    /// Human-readable description of the error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pio_uploadfs::ProbeError;
    ///
    /// assert_eq!(ProbeError::Timeout.description(), "Probe timed out");
    /// ```
    pub fn description(&self) -> &'static str {
        match self {
            Self::Timeout => "Probe timed out",
            Self::PermissionDenied => "Permission denied",
            Self::LaunchFailed => "Command could not be launched",
            Self::NonZeroExit { .. } => "Command exited with a failure status",
        }
    }
}

/// A fully specified build tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to run (path or bare command name).
    ///
    /// Kept as an OS string so paths that are not valid UTF-8 reach the
    /// child unchanged.
    pub program: OsString,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Working directory for the child process.
    pub cwd: PathBuf,
}

impl Invocation {
    /// The invocation rendered as a single shell-like line, for messages.
    ///
    /// Non-UTF-8 bytes in the program are replaced; use [`Invocation::program`]
    /// to spawn.
    pub fn command_line(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Exit status of a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStatus {
    /// Whether the process reported success.
    pub success: bool,
    /// Exit code, `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl StepStatus {
    /// A successful exit with code 0.
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    /// A failed exit with the given code.
    pub fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }
}

impl From<std::process::ExitStatus> for StepStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Spawns the processes needed to discover and drive the build tool.
///
/// Implementations must run one process at a time and only return once it
/// has finished.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `program arg` and return its output if it exits successfully.
    async fn probe(
        &self,
        program: &str,
        arg: &str,
        timeout: Duration,
    ) -> Result<String, ProbeError>;

    /// Run a build tool step to completion.
    ///
    /// An `Err` means the process could not be launched; a process that ran
    /// and failed is reported through [`StepStatus`].
    async fn run(&self, invocation: &Invocation) -> std::io::Result<StepStatus>;
}

/// [`CommandRunner`] that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn probe(
        &self,
        program: &str,
        arg: &str,
        timeout: Duration,
    ) -> Result<String, ProbeError> {
        check_version(program, arg, timeout).await
    }

    async fn run(&self, invocation: &Invocation) -> std::io::Result<StepStatus> {
        tracing::debug!(
            command = %invocation,
            cwd = %invocation.cwd.display(),
            "spawning step"
        );
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;
        Ok(status.into())
    }
}
