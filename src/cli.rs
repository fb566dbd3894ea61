//! Command-line arguments for `pio-uploadfs`.

use clap::{ArgAction, Parser};
use pio_uploadfs::{Candidate, LocateOptions, UploadOptions, DEFAULT_DATA_DIR};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "pio-uploadfs",
    version,
    about = "Locate PlatformIO, then build and upload the LittleFS filesystem image"
)]
pub struct Cli {
    /// PlatformIO project directory (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Name of the directory with the files to pack, inside the project.
    #[arg(long = "data-dir", value_name = "NAME", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    /// Build tool command to use; skips discovery.
    #[arg(long, value_name = "CMD", env = "PIO_UPLOADFS_TOOL")]
    pub tool: Option<String>,

    /// Candidate location to search; repeat to replace the default list.
    #[arg(long = "candidate", value_name = "SPEC")]
    pub candidates: Vec<String>,

    /// PlatformIO environment passed as `-e <ENV>`.
    #[arg(short = 'e', long, value_name = "ENV")]
    pub environment: Option<String>,

    /// Seconds to wait for a `--version` probe before giving up on it.
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub probe_timeout_secs: u64,

    /// Fail instead of asking for a command when discovery finds nothing.
    #[arg(long)]
    pub no_prompt: bool,

    /// Only report which build tool would be used.
    #[arg(long)]
    pub locate_only: bool,

    /// Print the `--locate-only` result as JSON.
    #[arg(long, requires = "locate_only")]
    pub json: bool,

    /// More log output (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Candidates from the command line, or the PlatformIO defaults.
    pub fn candidates(&self) -> Vec<Candidate> {
        if self.candidates.is_empty() {
            Candidate::platformio_defaults()
        } else {
            Candidate::parse_all(&self.candidates)
        }
    }

    pub fn upload_options(&self, project_dir: PathBuf) -> UploadOptions {
        UploadOptions {
            project_dir,
            data_dir_name: self.data_dir.clone(),
            tool: self.tool.clone(),
            environment: self.environment.clone(),
            locate: LocateOptions {
                probe_timeout: Duration::from_secs(self.probe_timeout_secs),
                ..Default::default()
            },
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
