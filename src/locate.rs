//! Build tool search over an ordered candidate list.

use crate::detection::{expand_home, expand_pattern, find_on_path, is_executable, parse_version};
use crate::runner::CommandRunner;
use crate::{Candidate, LocateOptions, Resolution};

/// Find the first usable build tool among `candidates`.
///
/// Candidates are checked strictly in order and the search stops at the
/// first hit, so later candidates are never touched:
///
/// 1. Patterns are expanded against the filesystem (after `~` expansion) and
///    the first executable match is taken.
/// 2. Paths are accepted if they name an existing executable file.
/// 3. Bare commands are run with the probe argument; a zero exit accepts
///    them. Launch failures, non-zero exits and timeouts only move the
///    search on.
///
/// Failed candidates are logged at debug level and never surfaced as
/// errors. If nothing matches the result is [`Resolution::NotFound`]; what to
/// do about that is up to the caller.
///
/// # Example
///
/// ```rust,no_run
/// use pio_uploadfs::{locate, Candidate, LocateOptions, SystemRunner};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let candidates = Candidate::platformio_defaults();
///     let found = locate(&candidates, &SystemRunner, &LocateOptions::default()).await;
///     match found.command() {
///         Some(cmd) => println!("PlatformIO: {cmd}"),
///         None => println!("PlatformIO not found"),
///     }
/// }
/// ```
pub async fn locate<R: CommandRunner>(
    candidates: &[Candidate],
    runner: &R,
    options: &LocateOptions,
) -> Resolution {
    for candidate in candidates {
        if let Some(resolution) = check_candidate(candidate, runner, options).await {
            let command = resolution.command().unwrap_or_default();
            tracing::info!(candidate = %candidate, command = %command, "build tool found");
            return resolution;
        }
    }

    tracing::debug!(tried = candidates.len(), "no candidate resolved");
    Resolution::NotFound
}

async fn check_candidate<R: CommandRunner>(
    candidate: &Candidate,
    runner: &R,
    options: &LocateOptions,
) -> Option<Resolution> {
    let home = options.home.as_deref();
    tracing::trace!(candidate = %candidate, kind = candidate.kind_name(), "checking candidate");

    match candidate {
        Candidate::Pattern(spec) => {
            let Some(pattern) = expand_home(spec, home) else {
                tracing::debug!(candidate = %spec, "no home directory, skipping");
                return None;
            };
            let found = expand_pattern(&pattern)
                .into_iter()
                .find(|path| is_executable(path));
            if found.is_none() {
                tracing::debug!(candidate = %spec, "no executable match");
            }
            found.map(|path| Resolution::FoundByPath { path })
        }
        Candidate::Path(spec) => {
            let Some(path) = expand_home(spec, home) else {
                tracing::debug!(candidate = %spec, "no home directory, skipping");
                return None;
            };
            if is_executable(&path) {
                Some(Resolution::FoundByPath { path })
            } else {
                tracing::debug!(candidate = %spec, "not an executable file");
                None
            }
        }
        Candidate::Command(name) => {
            match runner
                .probe(name, &options.probe_arg, options.probe_timeout)
                .await
            {
                Ok(output) => Some(Resolution::FoundByProbe {
                    command: name.clone(),
                    path: find_on_path(name),
                    version: parse_version(&output),
                }),
                Err(e) => {
                    tracing::debug!(candidate = %name, error = %e, "probe failed");
                    None
                }
            }
        }
    }
}
