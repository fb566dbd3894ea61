//! Result of a build tool search.

use semver::Version;
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Outcome of running the locator over a candidate list.
///
/// # Variants
///
/// - `FoundByPath`: an existing executable file, from a path or pattern candidate
/// - `FoundByProbe`: a bare command that answered the version probe
/// - `NotFound`: every candidate was rejected
///
/// # Example
///
/// ```rust
/// use pio_uploadfs::Resolution;
///
/// fn describe(resolution: &Resolution) -> String {
///     match resolution.command() {
///         Some(cmd) => format!("using {cmd}"),
///         None => "build tool not found".to_string(),
///     }
/// }
///
/// assert_eq!(describe(&Resolution::NotFound), "build tool not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    /// An executable file was found on disk.
    FoundByPath {
        /// Path to the executable, with `~` and wildcards expanded.
        path: PathBuf,
    },

    /// A bare command ran successfully with the probe argument.
    FoundByProbe {
        /// The command name as given in the candidate list.
        command: String,
        /// Where `PATH` lookup places the command, if it could be determined.
        path: Option<PathBuf>,
        /// Version reported by the probe, if the output contained one.
        version: Option<Version>,
    },

    /// No candidate resolved.
    NotFound,
}

impl Resolution {
    /// Whether a usable build tool was found.
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    /// The program to invoke the build tool with.
    ///
    /// Probe-found commands are returned by name, so the OS resolves them the
    /// same way the probe did. Paths are returned as-is, even when they are
    /// not valid UTF-8.
    pub fn program(&self) -> Option<&OsStr> {
        match self {
            Self::FoundByPath { path } => Some(path.as_os_str()),
            Self::FoundByProbe { command, .. } => Some(OsStr::new(command)),
            Self::NotFound => None,
        }
    }

    /// The build tool command as text, for messages and logs.
    ///
    /// Non-UTF-8 bytes in a found path are replaced; spawn with
    /// [`Resolution::program`] instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pio_uploadfs::Resolution;
    /// use std::path::PathBuf;
    ///
    /// let found = Resolution::FoundByPath { path: PathBuf::from("/usr/local/bin/pio") };
    /// assert_eq!(found.command().as_deref(), Some("/usr/local/bin/pio"));
    /// assert!(Resolution::NotFound.command().is_none());
    /// ```
    pub fn command(&self) -> Option<String> {
        match self {
            Self::FoundByPath { path } => Some(path.to_string_lossy().into_owned()),
            Self::FoundByProbe { command, .. } => Some(command.clone()),
            Self::NotFound => None,
        }
    }

    /// Filesystem location of the build tool, if known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FoundByPath { path } => Some(path),
            Self::FoundByProbe { path, .. } => path.as_deref(),
            Self::NotFound => None,
        }
    }

    /// Version reported by the probe, if any.
    pub fn version(&self) -> Option<&Version> {
        match self {
            Self::FoundByProbe { version, .. } => version.as_ref(),
            _ => None,
        }
    }
}
