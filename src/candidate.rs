//! Candidate specifiers for the build tool location.

use crate::detection::WILDCARD_CHARS;
use std::fmt;

/// PlatformIO locations searched by default, in priority order.
///
/// Bare commands first (whatever is on `PATH`), then the usual system and
/// per-user installs, then the interpreter bundled with the VS Code
/// extension.
pub const DEFAULT_PLATFORMIO_CANDIDATES: &[&str] = &[
    "platformio",
    "pio",
    "/usr/local/bin/platformio",
    "/usr/local/bin/pio",
    "~/.platformio/penv/bin/platformio",
    "~/.platformio/penv/bin/pio",
    "~/.vscode/extensions/platformio.platformio-ide-*/penv/bin/platformio",
    "~/.vscode/extensions/platformio.platformio-ide-*/penv/bin/pio",
];

/// One entry of the ordered candidate list.
///
/// The variant decides how the locator checks it: patterns are expanded
/// against the filesystem, paths are checked for an executable file, and
/// bare commands are probed by running them.
///
/// # Example
///
/// ```rust
/// use pio_uploadfs::Candidate;
///
/// assert!(matches!(Candidate::parse("pio"), Candidate::Command(_)));
/// assert!(matches!(Candidate::parse("/usr/bin/pio"), Candidate::Path(_)));
/// assert!(matches!(Candidate::parse("~/.platformio/penv/bin/pio"), Candidate::Path(_)));
/// assert!(matches!(Candidate::parse("~/ide-*/pio"), Candidate::Pattern(_)));
/// ```
///
/// Classification always goes through [`Candidate::parse`]; there is no
/// implicit conversion from a string:
///
/// ```rust,compile_fail
/// use pio_uploadfs::Candidate;
///
/// let candidate: Candidate = "pio".into();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Candidate {
    /// Contains a wildcard (`*` or `?`); may also be home-relative.
    Pattern(String),
    /// Absolute or home-relative path.
    Path(String),
    /// Bare command name, resolved by the OS when spawned.
    Command(String),
}

impl Candidate {
    /// Classify a specifier string.
    pub fn parse(spec: &str) -> Self {
        if spec.contains(WILDCARD_CHARS) {
            Self::Pattern(spec.to_string())
        } else if spec == "~"
            || spec.starts_with("~/")
            || std::path::Path::new(spec).is_absolute()
        {
            Self::Path(spec.to_string())
        } else {
            Self::Command(spec.to_string())
        }
    }

    /// The specifier as written.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pattern(s) | Self::Path(s) | Self::Command(s) => s,
        }
    }

    /// Short label for the candidate kind, used in log fields.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Pattern(_) => "pattern",
            Self::Path(_) => "path",
            Self::Command(_) => "command",
        }
    }

    /// Classify a list of specifiers, preserving order.
    pub fn parse_all<I, S>(specs: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        specs.into_iter().map(|s| Self::parse(s.as_ref())).collect()
    }

    /// The default PlatformIO candidate list.
    pub fn platformio_defaults() -> Vec<Self> {
        Self::parse_all(DEFAULT_PLATFORMIO_CANDIDATES.iter().copied())
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
