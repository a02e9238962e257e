//! Version pins a release channel is expected to run.
//!
//! One `VERSION.yaml` per channel lists the operator and runtime tags
//! pinned for each vendor:
//!
//! ```yaml
//! nvidia:
//!   operatorTag: v24.9.0
//!   runtimeTag: 12.4.1
//! amd:
//!   operatorTag: v0.9.0
//!   runtimeTag: 5.6.0
//! ```
//!
//! A vendor missing from the file has empty pins.

use serde::{Deserialize, Serialize};

use crate::types::Vendor;
use crate::vendor::ObservedVersion;

/// Operator and runtime tags pinned for one vendor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Pins {
    pub operator_tag: String,
    pub runtime_tag: String,
}

impl Pins {
    /// Neither tag is set.
    pub fn is_empty(&self) -> bool {
        self.operator_tag.is_empty() && self.runtime_tag.is_empty()
    }

    /// The pins in `observedVersion` form, `<operatorTag>/<runtimeTag>`.
    pub fn as_observed(&self) -> String {
        format!("{}/{}", self.operator_tag, self.runtime_tag)
    }

    /// Whether a channel's observed version is at these pins.
    ///
    /// Both sides compare as versions when they parse (so `v` prefixes
    /// don't matter), and as trimmed text otherwise.
    pub fn matches(&self, observed: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        let pinned = self.as_observed();
        match (ObservedVersion::parse(&pinned), ObservedVersion::parse(observed)) {
            (Ok(pinned), Ok(observed)) => pinned == observed,
            _ => pinned == observed.trim(),
        }
    }
}

/// Pins for every vendor on one release channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VendorPins {
    pub nvidia: Pins,
    pub amd: Pins,
    pub intel: Pins,
}

impl VendorPins {
    pub fn get(&self, vendor: Vendor) -> &Pins {
        match vendor {
            Vendor::Nvidia => &self.nvidia,
            Vendor::Amd => &self.amd,
            Vendor::Intel => &self.intel,
        }
    }
}
