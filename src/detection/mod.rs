//! Detection implementation submodule.
//!
//! Internal helpers used by the locator and the system runner:
//!
//! - `is_executable` / `expand_pattern` / `expand_home`: filesystem checks
//! - `find_on_path`: PATH lookup for reporting where a probed command lives
//! - `check_version`: version probe with a timeout
//! - `parse_version`: regex-based version extraction from probe output

mod parser;
mod path_finder;
mod version;

pub(crate) use parser::parse_version;
pub(crate) use path_finder::{
    expand_home, expand_pattern, find_on_path, is_executable, WILDCARD_CHARS,
};
pub(crate) use version::check_version;
