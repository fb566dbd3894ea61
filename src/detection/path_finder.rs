//! Filesystem checks for path and wildcard candidates.

use regex::Regex;
use std::path::{Component, Path, PathBuf};

/// Characters that turn a candidate into a wildcard pattern.
pub(crate) const WILDCARD_CHARS: &[char] = &['*', '?'];

/// Check whether `path` names an existing, executable regular file.
///
/// On unix this requires at least one execute bit. Elsewhere an existing
/// file is accepted as-is.
pub(crate) fn is_executable(path: &Path) -> bool {
    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return false,
    };
    if !meta.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Replace a leading `~` with `home`.
///
/// Returns `None` for a home-relative specifier when no home directory is
/// known. Specifiers without a leading `~` are returned unchanged.
pub(crate) fn expand_home(spec: &str, home: Option<&Path>) -> Option<PathBuf> {
    if spec == "~" {
        return home.map(Path::to_path_buf);
    }
    match spec.strip_prefix("~/") {
        Some(rest) => home.map(|h| h.join(rest)),
        None => Some(PathBuf::from(spec)),
    }
}

/// Resolve a bare command name through `PATH`.
pub(crate) fn find_on_path(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Expand a wildcard pattern against the filesystem.
///
/// The pattern is matched one path component at a time: `*` matches any run
/// of characters within a component and `?` matches exactly one. A component
/// that starts with a wildcard never matches dot-files. Matches are returned
/// sorted, and only paths that exist are included.
pub(crate) fn expand_pattern(pattern: &Path) -> Vec<PathBuf> {
    let mut current: Vec<PathBuf> = vec![PathBuf::new()];

    for component in pattern.components() {
        let part = match component {
            Component::Normal(part) => part.to_string_lossy(),
            other => {
                for path in &mut current {
                    path.push(other.as_os_str());
                }
                continue;
            }
        };

        if !part.contains(WILDCARD_CHARS) {
            for path in &mut current {
                path.push(&*part);
            }
            continue;
        }

        let matcher = match component_regex(&part) {
            Some(re) => re,
            None => return Vec::new(),
        };
        let hide_dotfiles = part.starts_with(WILDCARD_CHARS);

        let mut next = Vec::new();
        for dir in &current {
            let listing = if dir.as_os_str().is_empty() {
                std::fs::read_dir(".")
            } else {
                std::fs::read_dir(dir)
            };
            let entries = match listing {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::trace!(
                        dir = %dir.display(),
                        error = %e,
                        "skipping unreadable directory"
                    );
                    continue;
                }
            };
            let mut names: Vec<String> = entries
                .filter_map(Result::ok)
                .filter_map(|entry| entry.file_name().into_string().ok())
                .filter(|name| !(hide_dotfiles && name.starts_with('.')))
                .filter(|name| matcher.is_match(name))
                .collect();
            names.sort();
            next.extend(names.into_iter().map(|name| dir.join(name)));
        }
        current = next;
        if current.is_empty() {
            break;
        }
    }

    current.retain(|path| path.exists());
    current
}

/// Translate a single wildcard component into an anchored regex.
///
/// Wildcards match any character, newlines included, like shell globbing.
fn component_regex(part: &str) -> Option<Regex> {
    let mut re = String::with_capacity(part.len() + 12);
    re.push_str("(?s)^");
    for ch in part.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            c => re.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
    }
    re.push('$');
    Regex::new(&re).ok()
}
