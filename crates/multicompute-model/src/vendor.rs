//! Vendor chart sources and observed-version parsing.

use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::types::Vendor;

/// Helm chart a vendor's GPU operator is installed from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VendorSource {
    pub repo: String,
    pub chart: String,
    pub namespace: String,
}

impl Vendor {
    /// Default chart source for this vendor's operator.
    pub fn default_source(&self) -> VendorSource {
        let (repo, chart, namespace) = match self {
            Vendor::Nvidia => (
                "https://nvidia.github.io/helm-charts",
                "gpu-operator",
                "gpu-operator",
            ),
            Vendor::Amd => (
                "https://rocm.github.io/helm-charts",
                "rocm-device-plugin",
                "rocm-system",
            ),
            Vendor::Intel => (
                "https://intel.github.io/helm-charts",
                "intel-gpu-plugin",
                "intel-gpu",
            ),
        };
        VendorSource {
            repo: repo.to_string(),
            chart: chart.to_string(),
            namespace: namespace.to_string(),
        }
    }
}

/// Parsed form of a channel's `observedVersion` string.
///
/// The stored field is free text; this is a best-effort view of the
/// conventional `<operatorTag>/<runtimeTag>` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedVersion {
    pub operator: Version,
    pub runtime: Version,
}

impl ObservedVersion {
    /// Parse `v24.9.0/12.4.1`-style text. A leading `v` on either half is optional.
    pub fn parse(text: &str) -> ModelResult<Self> {
        let (operator, runtime) = text
            .trim()
            .split_once('/')
            .ok_or_else(|| ModelError::MalformedObservedVersion(text.to_string()))?;
        if runtime.contains('/') {
            return Err(ModelError::MalformedObservedVersion(text.to_string()));
        }
        Ok(Self {
            operator: parse_tag(operator)?,
            runtime: parse_tag(runtime)?,
        })
    }
}

impl fmt::Display for ObservedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}/{}", self.operator, self.runtime)
    }
}

fn parse_tag(tag: &str) -> ModelResult<Version> {
    let trimmed = tag.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(bare).map_err(|e| ModelError::InvalidVersion {
        value: tag.to_string(),
        reason: e.to_string(),
    })
}
