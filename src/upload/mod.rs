//! Filesystem image build and upload.
//!
//! # Example
//!
//! ```rust,no_run
//! use pio_uploadfs::{run_fs_targets, SystemRunner, UploadOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let options = UploadOptions::default();
//!     let tool = std::ffi::OsStr::new("pio");
//!     match run_fs_targets(tool, &SystemRunner, &options, |_| {}).await {
//!         Ok(()) => println!("Filesystem uploaded"),
//!         Err(e) => eprintln!("{e}\n{}", e.fix_suggestion()),
//!     }
//! }
//! ```

mod errors;
mod executor;
mod progress;
mod target;

pub use errors::UploadError;
pub use executor::{run_fs_targets, upload_filesystem};
pub use progress::UploadProgress;
pub use target::FsTarget;
