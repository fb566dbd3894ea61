//! # pio-uploadfs
//!
//! Locate PlatformIO on the local machine and build and upload a LittleFS
//! filesystem image with it.
//!
//! The crate has two parts:
//!
//! - [`locate`] searches an ordered list of [`Candidate`]s (bare commands,
//!   absolute or home-relative paths, wildcard patterns) and returns a
//!   tri-state [`Resolution`]
//! - [`upload_filesystem`] ensures the data directory exists, runs the
//!   search, falls back to an operator-supplied command, then runs the
//!   `buildfs` and `uploadfs` targets in order
//!
//! All processes are spawned through the [`CommandRunner`] trait, so the
//! search and upload flow can be driven without touching the system.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pio_uploadfs::{locate, Candidate, LocateOptions, SystemRunner};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let candidates = Candidate::platformio_defaults();
//!     let resolution = locate(&candidates, &SystemRunner, &LocateOptions::default()).await;
//!     if let Some(cmd) = resolution.command() {
//!         println!("PlatformIO is available as {cmd}");
//!     }
//! }
//! ```

mod candidate;
mod detection;
mod locate;
mod options;
mod prompt;
mod resolution;
mod runner;
mod upload;

#[cfg(test)]
mod test_support;

pub use candidate::{Candidate, DEFAULT_PLATFORMIO_CANDIDATES};
pub use locate::locate;
pub use options::{LocateOptions, UploadOptions, DEFAULT_DATA_DIR, DEFAULT_PROBE_ARG};
pub use prompt::prompt_for_command;
pub use resolution::Resolution;
pub use runner::{CommandRunner, Invocation, ProbeError, StepStatus, SystemRunner};
pub use upload::{run_fs_targets, upload_filesystem, FsTarget, UploadError, UploadProgress};
