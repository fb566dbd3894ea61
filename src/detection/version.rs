//! Version probe with timeout.

use crate::runner::ProbeError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Run `program arg` and return its output.
///
/// The child is killed if it does not finish within `limit`. On unix the
/// probe runs in its own process group and the whole group is killed, so
/// wrapper scripts do not leave their own children running. Stdout is
/// preferred; tools that print their version to stderr fall back to that.
/// Output is decoded lossily since only the exit status decides the outcome.
///
/// # Errors
///
/// - `Timeout` if the command takes longer than `limit`
/// - `PermissionDenied` if the executable cannot be run due to permissions
/// - `LaunchFailed` for any other spawn failure (including not found)
/// - `NonZeroExit` if the process ran but reported failure
pub(crate) async fn check_version(
    program: &str,
    arg: &str,
    limit: Duration,
) -> Result<String, ProbeError> {
    let mut command = Command::new(program);
    command
        .arg(arg)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    command.process_group(0);

    let child = command.spawn().map_err(launch_error)?;
    let pid = child.id();

    let output = match timeout(limit, child.wait_with_output()).await {
        Ok(result) => result.map_err(launch_error)?,
        Err(_) => {
            kill_process_group(pid);
            return Err(ProbeError::Timeout);
        }
    };

    if !output.status.success() {
        return Err(ProbeError::NonZeroExit {
            code: output.status.code(),
        });
    }

    let out = if !output.stdout.is_empty() {
        output.stdout
    } else {
        output.stderr
    };

    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn launch_error(e: std::io::Error) -> ProbeError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        ProbeError::PermissionDenied
    } else {
        ProbeError::LaunchFailed
    }
}

/// Kill every process in the probe's group.
///
/// The direct child is also killed when its handle is dropped.
#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    let Some(pgid) = pid.and_then(|p| libc::pid_t::try_from(p).ok()) else {
        return;
    };
    // SAFETY: killpg only sends a signal. The group id is the probe's own
    // pid, set through `process_group(0)` at spawn.
    let result = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if result != 0 {
        let err = std::io::Error::last_os_error();
        if err.raw_os_error() != Some(libc::ESRCH) {
            tracing::debug!(pgid, error = %err, "failed to kill probe process group");
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: Option<u32>) {}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(unix)]
    use crate::test_support::write_script;

    const LIMIT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_check_version_nonexistent() {
        let result = check_version("/nonexistent/path/to/platformio", "--version", LIMIT).await;
        assert_eq!(result, Err(ProbeError::LaunchFailed));
    }

    #[tokio::test]
    async fn test_check_version_unknown_command() {
        let result = check_version("definitely_not_a_real_pio_12345", "--version", LIMIT).await;
        assert_eq!(result, Err(ProbeError::LaunchFailed));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_check_version_nonzero_exit() {
        let path = std::path::Path::new("/bin/sh");
        if path.exists() {
            // `sh -c` without a command string is a usage error
            let result = check_version("/bin/sh", "-c", LIMIT).await;
            assert!(matches!(result, Err(ProbeError::NonZeroExit { .. })));
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_check_version_passes_argument() {
        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("echo-arg");
        write_script(&script, "echo \"got $1\"");

        let output = check_version(script.to_str().unwrap(), "--custom-flag", LIMIT)
            .await
            .unwrap();
        assert_eq!(output.trim(), "got --custom-flag");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_check_version_falls_back_to_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("errpio");
        write_script(&script, "echo 'PlatformIO Core, version 6.1.15' >&2");

        let output = check_version(script.to_str().unwrap(), "--version", LIMIT)
            .await
            .unwrap();
        assert_eq!(output.trim(), "PlatformIO Core, version 6.1.15");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_check_version_prefers_stdout() {
        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("both");
        write_script(&script, "echo 'noise' >&2\necho '6.1.15'");

        let output = check_version(script.to_str().unwrap(), "--version", LIMIT)
            .await
            .unwrap();
        assert_eq!(output.trim(), "6.1.15");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_check_version_reports_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("badpio");
        write_script(&script, "exit 3");

        let result = check_version(script.to_str().unwrap(), "--version", LIMIT).await;
        assert_eq!(result, Err(ProbeError::NonZeroExit { code: Some(3) }));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_timeout_kills_grandchildren() {
        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("slowpio");
        let pid_file = tmp.path().join("sleep.pid");
        write_script(&script, "sleep 30 &\necho $! > \"$1\"\nwait");

        let started = std::time::Instant::now();
        let result = check_version(
            script.to_str().unwrap(),
            pid_file.to_str().unwrap(),
            Duration::from_millis(500),
        )
        .await;

        assert_eq!(result, Err(ProbeError::Timeout));
        assert!(started.elapsed() < Duration::from_secs(10));

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let pid = pid.trim();
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while is_running(pid) && std::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(!is_running(pid), "sleep {pid} survived the timeout");
    }

    /// Whether `pid` is alive; zombies count as gone.
    #[cfg(target_os = "linux")]
    fn is_running(pid: &str) -> bool {
        let Ok(stat) = std::fs::read_to_string(format!("/proc/{pid}/stat")) else {
            return false;
        };
        let state = stat
            .rsplit_once(')')
            .and_then(|(_, rest)| rest.trim_start().chars().next());
        !matches!(state, Some('Z') | Some('X') | None)
    }
}
