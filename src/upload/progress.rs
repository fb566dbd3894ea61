//! Progress reporting for the filesystem upload.

use crate::FsTarget;

/// Stages of a filesystem upload, reported through a callback.
///
/// # Example
///
/// ```rust
/// use pio_uploadfs::UploadProgress;
///
/// fn on_progress(progress: UploadProgress) {
///     match &progress {
///         UploadProgress::ToolResolved { command } => println!("Using {command}"),
///         other => println!("{}", other.description()),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadProgress {
    /// Checking (and if needed creating) the data directory.
    PreparingDataDir,

    /// Searching the candidate list.
    Locating,

    /// The build tool command is settled.
    ToolResolved {
        /// Command that will be invoked.
        command: String,
    },

    /// A step is about to run.
    Running {
        /// The step.
        target: FsTarget,
    },

    /// Both steps finished successfully.
    Completed,
}

impl UploadProgress {
    /// Human-readable description of the current stage.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pio_uploadfs::{FsTarget, UploadProgress};
    ///
    /// let progress = UploadProgress::Running { target: FsTarget::BuildFs };
    /// assert_eq!(progress.description(), "Building filesystem image");
    /// ```
    pub fn description(&self) -> &'static str {
        match self {
            Self::PreparingDataDir => "Preparing data directory",
            Self::Locating => "Locating build tool",
            Self::ToolResolved { .. } => "Build tool resolved",
            Self::Running { target } => target.display_name(),
            Self::Completed => "Filesystem uploaded",
        }
    }

    /// Check if this stage indicates completion.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
