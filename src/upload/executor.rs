//! Build and upload execution.
//!
//! [`upload_filesystem`] is the whole flow: data directory, tool discovery,
//! operator fallback, then `buildfs` and `uploadfs`. [`run_fs_targets`] runs
//! only the two steps for callers that already know the tool.

use crate::runner::{CommandRunner, Invocation};
use crate::upload::{FsTarget, UploadError, UploadProgress};
use crate::{locate, Candidate, UploadOptions};
use std::ffi::{OsStr, OsString};
use std::future::Future;
use std::path::Path;

const INSTALL_FIX: &str =
    "Install PlatformIO (https://platformio.org/install) or pass --tool <path>";
const BUILD_FIX: &str = "See the build tool output above; \
    check platformio.ini and the data directory contents";
const UPLOAD_FIX: &str = "See the build tool output above; \
    check that the board is connected and the upload port is free";

/// Build and upload the filesystem image.
///
/// This function:
/// 1. Ensures the data directory exists, creating it if missing
/// 2. Uses `options.tool` if set, otherwise searches `candidates`
/// 3. Awaits `fallback` when the search finds nothing
/// 4. Runs `buildfs` then `uploadfs` in the project directory
///
/// # Arguments
///
/// - `candidates`: ordered build tool locations to search
/// - `runner`: spawns the probe and step processes
/// - `options`: project layout and search configuration
/// - `fallback`: asked for a substitute command when the search fails;
///   `None` or a blank string aborts. It is async so an interactive prompt
///   can read stdin off the runtime thread.
/// - `on_progress`: callback for progress updates
///
/// # Returns
///
/// The build tool program that was used, or an [`UploadError`] naming what
/// failed. A failed `buildfs` step stops the run before `uploadfs`.
///
/// # Example
///
/// ```rust,no_run
/// use pio_uploadfs::{upload_filesystem, Candidate, SystemRunner, UploadOptions};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let result = upload_filesystem(
///         &Candidate::platformio_defaults(),
///         &SystemRunner,
///         &UploadOptions::default(),
///         || async { None },
///         |progress| println!("{}", progress.description()),
///     )
///     .await;
///
///     if let Err(e) = result {
///         eprintln!("Failed: {}. Fix: {}", e, e.fix_suggestion());
///     }
/// }
/// ```
pub async fn upload_filesystem<R, P, Fut, F>(
    candidates: &[Candidate],
    runner: &R,
    options: &UploadOptions,
    fallback: P,
    on_progress: F,
) -> Result<OsString, UploadError>
where
    R: CommandRunner,
    P: FnOnce() -> Fut,
    Fut: Future<Output = Option<String>>,
    F: Fn(UploadProgress),
{
    on_progress(UploadProgress::PreparingDataDir);
    ensure_data_dir(&options.data_dir())?;

    let configured = options
        .tool
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let tool = match configured {
        Some(tool) => {
            tracing::debug!(tool, "using configured build tool");
            OsString::from(tool)
        }
        None => {
            on_progress(UploadProgress::Locating);
            let resolution = locate(candidates, runner, &options.locate).await;
            match resolution.program() {
                Some(program) => program.to_os_string(),
                None => {
                    tracing::warn!(tried = candidates.len(), "build tool not found");
                    fallback()
                        .await
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .map(OsString::from)
                        .ok_or_else(|| UploadError::ToolNotFound {
                            tried: candidates.len(),
                            fix: INSTALL_FIX.to_string(),
                        })?
                }
            }
        }
    };

    let command = tool.to_string_lossy().into_owned();
    on_progress(UploadProgress::ToolResolved {
        command: command.clone(),
    });
    tracing::info!(command = %command, "using build tool");

    run_fs_targets(&tool, runner, options, on_progress).await?;
    Ok(tool)
}

/// Run `buildfs` then `uploadfs` with an already-known build tool.
///
/// Each step runs in `options.project_dir` and is awaited to completion; the
/// first failure is returned with the step that was in flight. No retries.
pub async fn run_fs_targets<R, F>(
    tool: &OsStr,
    runner: &R,
    options: &UploadOptions,
    on_progress: F,
) -> Result<(), UploadError>
where
    R: CommandRunner,
    F: Fn(UploadProgress),
{
    for target in FsTarget::all() {
        let invocation = Invocation {
            program: tool.to_os_string(),
            args: target.args(options.environment.as_deref()),
            cwd: options.project_dir.clone(),
        };

        on_progress(UploadProgress::Running { target });
        tracing::info!(step = %target, command = %invocation, "{}", target.display_name());

        let status = runner
            .run(&invocation)
            .await
            .map_err(|source| UploadError::Launch {
                target,
                command: invocation.command_line(),
                fix: launch_fix(&source),
                source,
            })?;

        if !status.success {
            return Err(UploadError::StepFailed {
                target,
                command: invocation.command_line(),
                exit_code: status.code,
                fix: step_fix(target).to_string(),
            });
        }
    }

    on_progress(UploadProgress::Completed);
    Ok(())
}

/// Create the data directory if it does not exist yet.
fn ensure_data_dir(path: &Path) -> Result<(), UploadError> {
    if path.is_dir() {
        tracing::info!(path = %path.display(), "using data directory");
        return Ok(());
    }

    tracing::warn!(path = %path.display(), "data directory does not exist, creating it");
    std::fs::create_dir_all(path).map_err(|source| UploadError::DataDir {
        path: path.to_path_buf(),
        source,
        fix: "Check that the project directory exists and is writable".to_string(),
    })
}

fn launch_fix(error: &std::io::Error) -> String {
    match error.kind() {
        std::io::ErrorKind::NotFound => {
            "Build tool not found at that location; check the path or pass --tool".to_string()
        }
        std::io::ErrorKind::PermissionDenied => {
            "Build tool is not executable; check its permissions".to_string()
        }
        _ => "Check the build tool command and try again".to_string(),
    }
}

fn step_fix(target: FsTarget) -> &'static str {
    match target {
        FsTarget::BuildFs => BUILD_FIX,
        FsTarget::UploadFs => UPLOAD_FIX,
    }
}
