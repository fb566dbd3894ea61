//! Filesystem targets run through the build tool.

use serde::Serialize;
use strum::IntoEnumIterator;

/// One of the two build tool steps, in execution order.
///
/// # Example
///
/// ```rust
/// use pio_uploadfs::FsTarget;
///
/// let order: Vec<_> = FsTarget::all().map(|t| t.target_name()).collect();
/// assert_eq!(order, ["buildfs", "uploadfs"]);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::EnumIter,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FsTarget {
    /// Build the filesystem image from the data directory.
    BuildFs,
    /// Flash the filesystem image to the device.
    UploadFs,
}

impl FsTarget {
    /// The `--target` value understood by PlatformIO.
    pub fn target_name(&self) -> &'static str {
        (*self).into()
    }

    /// Short description for progress messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BuildFs => "Building filesystem image",
            Self::UploadFs => "Uploading filesystem image",
        }
    }

    /// Arguments for `<tool> run --target <target> [-e <env>]`.
    pub fn args(&self, environment: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "--target".to_string(),
            self.target_name().to_string(),
        ];
        if let Some(env) = environment {
            args.push("-e".to_string());
            args.push(env.to_string());
        }
        args
    }

    /// All targets in the order they must run.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}
