//! Shared fixtures for unit tests.

use crate::runner::{CommandRunner, Invocation, ProbeError, StepStatus};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::time::Duration;

/// Runner that answers from canned responses and records every call.
#[derive(Default)]
pub(crate) struct FakeRunner {
    probe_responses: HashMap<String, Result<String, ProbeError>>,
    step_results: RefCell<VecDeque<std::io::Result<StepStatus>>>,
    pub(crate) probed: RefCell<Vec<String>>,
    pub(crate) invocations: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make `program` answer the probe with `output`.
    pub(crate) fn with_probe_ok(mut self, program: &str, output: &str) -> Self {
        self.probe_responses
            .insert(program.to_string(), Ok(output.to_string()));
        self
    }

    /// Make `program` fail the probe with `error`.
    pub(crate) fn with_probe_err(mut self, program: &str, error: ProbeError) -> Self {
        self.probe_responses.insert(program.to_string(), Err(error));
        self
    }

    /// Queue the result of the next `run` call. Unqueued runs succeed.
    pub(crate) fn with_step(self, result: std::io::Result<StepStatus>) -> Self {
        self.step_results.borrow_mut().push_back(result);
        self
    }

    pub(crate) fn probed(&self) -> Vec<String> {
        self.probed.borrow().clone()
    }

    pub(crate) fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    async fn probe(
        &self,
        program: &str,
        _arg: &str,
        _timeout: Duration,
    ) -> Result<String, ProbeError> {
        self.probed.borrow_mut().push(program.to_string());
        self.probe_responses
            .get(program)
            .cloned()
            .unwrap_or(Err(ProbeError::LaunchFailed))
    }

    async fn run(&self, invocation: &Invocation) -> std::io::Result<StepStatus> {
        self.invocations.borrow_mut().push(invocation.clone());
        self.step_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(StepStatus::ok()))
    }
}

/// Write an executable shell script that prints a PlatformIO version.
pub(crate) fn write_executable(path: &Path) {
    write_script(path, "echo 'PlatformIO Core, version 6.1.15'");
}

/// Write an executable `sh` script running `body`, creating parent
/// directories.
pub(crate) fn write_script(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms).unwrap();
    }
}

/// Write a regular, non-executable file at `path`.
pub(crate) fn write_plain(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, "not a program").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o644);
        std::fs::set_permissions(path, perms).unwrap();
    }
}
