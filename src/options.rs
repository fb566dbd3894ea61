//! Locator and uploader configuration.
//!
//! This module provides [`LocateOptions`] for the build tool search and
//! [`UploadOptions`] for the buildfs/uploadfs run.

use std::path::PathBuf;
use std::time::Duration;

/// Default argument passed to bare commands when probing them.
pub const DEFAULT_PROBE_ARG: &str = "--version";

/// Default name of the directory holding the files to pack into the image.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Configuration options for the build tool search.
///
/// # Default Behavior
///
/// Bare commands are probed with `--version` and given 5 seconds to
/// answer. The home directory used for `~` expansion comes from `HOME`
/// (or `USERPROFILE` on Windows).
///
/// # Example
///
/// ```rust
/// use pio_uploadfs::LocateOptions;
/// use std::time::Duration;
///
/// let opts = LocateOptions {
///     probe_timeout: Duration::from_secs(10),
///     ..Default::default()
/// };
/// assert_eq!(opts.probe_arg, "--version");
/// ```
#[derive(Debug, Clone)]
pub struct LocateOptions {
    /// Argument used to probe bare commands.
    ///
    /// Default: `--version`
    pub probe_arg: String,

    /// Maximum time a probe may run before it is killed and treated as
    /// not found.
    ///
    /// Default: 5 seconds
    pub probe_timeout: Duration,

    /// Directory substituted for a leading `~`.
    ///
    /// Home-relative candidates are skipped when this is `None`.
    pub home: Option<PathBuf>,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            probe_arg: DEFAULT_PROBE_ARG.to_string(),
            probe_timeout: Duration::from_secs(5),
            home: home_dir(),
        }
    }
}

/// Configuration options for building and uploading the filesystem image.
///
/// # Example
///
/// ```rust
/// use pio_uploadfs::UploadOptions;
///
/// let opts = UploadOptions {
///     project_dir: "/work/firmware".into(),
///     environment: Some("esp32dev".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(opts.data_dir().to_str(), Some("/work/firmware/data"));
/// ```
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Project directory; the build tool runs here.
    ///
    /// Default: `.`
    pub project_dir: PathBuf,

    /// Name of the data directory inside `project_dir`.
    ///
    /// Default: `data`
    pub data_dir_name: String,

    /// Build tool command to use instead of searching for one.
    pub tool: Option<String>,

    /// PlatformIO environment passed as `-e <env>`, if any.
    pub environment: Option<String>,

    /// Options for the build tool search.
    pub locate: LocateOptions,
}

impl UploadOptions {
    /// Full path of the data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.project_dir.join(&self.data_dir_name)
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            data_dir_name: DEFAULT_DATA_DIR.to_string(),
            tool: None,
            environment: None,
            locate: LocateOptions::default(),
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
