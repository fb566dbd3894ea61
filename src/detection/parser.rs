//! Version extraction from probe output.

use regex::Regex;
use semver::Version;
use std::sync::OnceLock;

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)").expect("Invalid regex pattern"))
}

/// Parse a semantic version from a tool's `--version` output.
///
/// The first `major.minor.patch` triple in the text wins:
///
/// - `PlatformIO Core, version 6.1.15` -> 6.1.15
/// - `pio, version 5.2.5` -> 5.2.5
/// - `6.1.16` -> 6.1.16
///
/// Returns `None` when nothing in the output looks like a version. A probe
/// that succeeded without printing a version still counts as found, so this
/// is informational only.
pub(crate) fn parse_version(output: &str) -> Option<Version> {
    let caps = version_regex().captures(output)?;
    Version::parse(caps.get(0)?.as_str()).ok()
}
