//! Integration tests for build tool discovery and the upload flow.
//!
//! These use the real [`SystemRunner`] against scripts written to a temporary
//! directory, so they only run on unix.

#![cfg(unix)]

use pio_uploadfs::{
    locate, upload_filesystem, Candidate, FsTarget, LocateOptions, Resolution, SystemRunner,
    UploadError, UploadOptions,
};
use semver::Version;
use std::ffi::OsStr;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

fn write_script(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

/// Put `dir` in front of `PATH` for the rest of the test binary.
fn prepend_to_path(dir: &Path) {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(current) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&current));
    }
    std::env::set_var("PATH", std::env::join_paths(paths).unwrap());
}

async fn no_answer() -> Option<String> {
    None
}

fn options(home: Option<PathBuf>) -> LocateOptions {
    LocateOptions {
        home,
        probe_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_unknown_commands_are_not_found() {
    let candidates = Candidate::parse_all([
        "definitely_not_platformio_12345",
        "/nonexistent/bin/pio",
        "~/.nonexistent/pio",
    ]);
    let res = locate(&candidates, &SystemRunner, &options(None)).await;
    assert_eq!(res, Resolution::NotFound);
}

#[tokio::test]
async fn test_commands_on_path_skip_slow_and_failing_tools() {
    let tmp = tempfile::tempdir().unwrap();
    let bin = tmp.path().join("bin");
    write_script(&bin.join("slowpio"), "sleep 30");
    write_script(&bin.join("badpio"), "exit 3");
    write_script(
        &bin.join("errpio"),
        "echo 'PlatformIO Core, version 6.1.15' >&2",
    );
    prepend_to_path(&bin);

    let opts = LocateOptions {
        probe_timeout: Duration::from_millis(300),
        ..options(None)
    };
    let candidates = Candidate::parse_all(["slowpio", "badpio", "errpio"]);
    let started = Instant::now();
    let res = locate(&candidates, &SystemRunner, &opts).await;
    let elapsed = started.elapsed();

    match res {
        Resolution::FoundByProbe {
            command,
            path,
            version,
        } => {
            assert_eq!(command, "errpio");
            assert_eq!(version, Some(Version::new(6, 1, 15)));
            let file_name = path.as_deref().and_then(Path::file_name);
            assert_eq!(file_name, Some(OsStr::new("errpio")));
        }
        other => panic!("unexpected resolution: {other:?}"),
    }
    assert!(elapsed < Duration::from_secs(10), "search took {elapsed:?}");
}

#[tokio::test]
async fn test_absolute_path_after_failed_command() {
    let tmp = tempfile::tempdir().unwrap();
    let exe = tmp.path().join("abs/exists/exe");
    write_script(&exe, "exit 0");

    let candidates = Candidate::parse_all([
        "nope_not_a_command_12345",
        exe.to_str().unwrap(),
        "~/.x/pio",
    ]);
    let res = locate(&candidates, &SystemRunner, &options(Some(tmp.path().into()))).await;

    assert_eq!(res, Resolution::FoundByPath { path: exe });
}

#[tokio::test]
async fn test_vscode_extension_pattern() {
    let tmp = tempfile::tempdir().unwrap();
    let exe = tmp
        .path()
        .join(".vscode/extensions/platformio.platformio-ide-3.3.4/penv/bin/platformio");
    write_script(&exe, "exit 0");

    let res = locate(
        &Candidate::platformio_defaults()[4..],
        &SystemRunner,
        &options(Some(tmp.path().into())),
    )
    .await;

    assert_eq!(res.path(), Some(exe.as_path()));
}

#[tokio::test]
async fn test_upload_flow_runs_steps_in_project_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    let log = tmp.path().join("calls.log");
    let tool = tmp.path().join("bin/pio");
    write_script(
        &tool,
        &format!("echo \"$(pwd -P) $*\" >> '{}'", log.display()),
    );

    let opts = UploadOptions {
        project_dir: project.clone(),
        locate: options(None),
        ..Default::default()
    };
    let used = upload_filesystem(
        &Candidate::parse_all([tool.to_str().unwrap()]),
        &SystemRunner,
        &opts,
        no_answer,
        |_| {},
    )
    .await
    .unwrap();

    assert_eq!(PathBuf::from(used), tool);
    assert!(project.join("data").is_dir());
    let calls = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = calls.lines().collect();
    let project = fs::canonicalize(&project).unwrap();
    assert_eq!(
        lines,
        vec![
            format!("{} run --target buildfs", project.display()),
            format!("{} run --target uploadfs", project.display()),
        ]
    );
}

#[tokio::test]
async fn test_failing_build_step_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let tool = tmp.path().join("bin/pio");
    write_script(&tool, "[ \"$3\" = buildfs ] && exit 4\nexit 0");

    let opts = UploadOptions {
        project_dir: tmp.path().to_path_buf(),
        tool: Some(tool.to_str().unwrap().to_string()),
        locate: options(None),
        ..Default::default()
    };
    let err = upload_filesystem(&[], &SystemRunner, &opts, no_answer, |_| {})
        .await
        .unwrap_err();

    match err {
        UploadError::StepFailed {
            target, exit_code, ..
        } => {
            assert_eq!(target, FsTarget::BuildFs);
            assert_eq!(exit_code, Some(4));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
