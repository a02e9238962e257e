//! FileResolver: per-channel version pins read from `VERSION.yaml`.
//!
//! ```text
//! <version_dir>/
//!   stable/VERSION.yaml
//!   lts/VERSION.yaml
//!   canary/VERSION.yaml
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use multicompute_model::{ReleaseChannel, VendorPins};

/// File name of the pin list inside each channel directory.
pub const VERSION_FILE: &str = "VERSION.yaml";

/// Default directory holding one subdirectory per release channel.
pub const DEFAULT_VERSION_DIR: &str = "versions";

/// Resolves pins from a directory tree, re-reading the file on every call.
#[derive(Debug, Clone)]
pub struct FileResolver {
    version_dir: PathBuf,
}

impl FileResolver {
    pub fn new(version_dir: impl Into<PathBuf>) -> Self {
        Self {
            version_dir: version_dir.into(),
        }
    }

    pub fn version_dir(&self) -> &Path {
        &self.version_dir
    }

    /// `<version_dir>/<channel>/VERSION.yaml`
    pub fn version_file(&self, channel: ReleaseChannel) -> PathBuf {
        self.version_dir.join(channel.as_str()).join(VERSION_FILE)
    }

    pub fn resolve(&self, channel: ReleaseChannel) -> anyhow::Result<VendorPins> {
        let path = self.version_file(channel);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read version file {}", path.display()))?;
        let pins: VendorPins = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse version file {}", path.display()))?;
        debug!(%channel, path = %path.display(), "version pins resolved");
        Ok(pins)
    }
}

impl Default for FileResolver {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION_DIR)
    }
}
