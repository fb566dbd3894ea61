//! Error types for the filesystem upload.
//!
//! Every variant carries an actionable fix suggestion, and step failures
//! name the exact target that was running.

use crate::FsTarget;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can stop a filesystem upload.
///
/// # Example
///
/// ```rust
/// use pio_uploadfs::UploadError;
///
/// fn report(error: &UploadError) {
///     eprintln!("Error: {}", error);
///     eprintln!("To fix: {}", error.fix_suggestion());
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UploadError {
    /// The data directory was missing and could not be created.
    #[error("Cannot create data directory {}: {source}", .path.display())]
    DataDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// No candidate resolved and no substitute command was supplied.
    #[error("Build tool not found")]
    ToolNotFound {
        /// Number of candidates that were tried.
        tried: usize,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// A step could not be started.
    #[error("Failed to launch {target} step `{command}`: {source}")]
    Launch {
        /// Step that was in flight.
        target: FsTarget,
        /// Full command line of the step.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// A step ran and exited unsuccessfully.
    #[error(
        "{target} step failed (exit code {code}): `{command}`",
        code = describe_code(.exit_code)
    )]
    StepFailed {
        /// Step that was in flight.
        target: FsTarget,
        /// Full command line of the step.
        command: String,
        /// Exit code, `None` if the process was killed by a signal.
        exit_code: Option<i32>,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },
}

impl UploadError {
    /// Get an actionable suggestion for fixing this error.
    pub fn fix_suggestion(&self) -> &str {
        match self {
            Self::DataDir { fix, .. } => fix,
            Self::ToolNotFound { fix, .. } => fix,
            Self::Launch { fix, .. } => fix,
            Self::StepFailed { fix, .. } => fix,
        }
    }

    /// The step that failed, if the error came from running one.
    pub fn failed_target(&self) -> Option<FsTarget> {
        match self {
            Self::Launch { target, .. } | Self::StepFailed { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// The command line that failed, if the error came from running a step.
    pub fn failed_command(&self) -> Option<&str> {
        match self {
            Self::Launch { command, .. } | Self::StepFailed { command, .. } => Some(command),
            _ => None,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none, terminated by signal".to_string(),
    }
}
