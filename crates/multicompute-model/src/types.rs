//! Domain types for the MultiCompute dashboard.
//!
//! These types represent channels, clusters, and the read-only records
//! observed against them. Only `Channel` is mutable through a data source;
//! the rest are query results.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Unique identifier for a channel.
pub type ChannelId = String;

/// Unique identifier for a cluster.
pub type ClusterId = String;

/// Declare a closed string enumeration with its wire spelling.
///
/// Generates serde renames, `as_str`, `Display`, `FromStr`, and an `ALL`
/// slice listing every variant in declaration order.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire spelling of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ModelError::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

// ── Enumerations ──────────────────────────────────────────────────

string_enum! {
    /// GPU vendor whose operator stack a channel tracks.
    Vendor("vendor") {
        Nvidia => "nvidia",
        Amd => "amd",
        Intel => "intel",
    }
}

string_enum! {
    /// Release stream a channel follows.
    ReleaseChannel("channel") {
        Stable => "stable",
        Lts => "lts",
        Canary => "canary",
    }
}

string_enum! {
    /// Rollout phase of a channel.
    ChannelPhase("phase") {
        Pending => "Pending",
        Progressing => "Progressing",
        Succeeded => "Succeeded",
        Failed => "Failed",
    }
}

string_enum! {
    /// Readiness of a cluster.
    ClusterStatus("cluster status") {
        Ready => "Ready",
        NotReady => "NotReady",
        Unknown => "Unknown",
    }
}

string_enum! {
    /// State of a bundle applied to one cluster.
    DeploymentStatus("deployment status") {
        Ready => "Ready",
        Failed => "Failed",
        Progressing => "Progressing",
    }
}

string_enum! {
    /// Kind of divergence a drift event reports.
    DriftKind("drift type") {
        VersionMismatch => "VersionMismatch",
        ConfigurationDrift => "ConfigurationDrift",
        PolicyViolation => "PolicyViolation",
    }
}

string_enum! {
    /// How urgent a drift event is.
    Severity("severity") {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

impl ChannelPhase {
    /// Whether the rollout has reached a final phase.
    pub fn is_terminal(&self) -> bool {
        match self {
            ChannelPhase::Succeeded | ChannelPhase::Failed => true,
            ChannelPhase::Pending | ChannelPhase::Progressing => false,
        }
    }
}

// ── Channel ───────────────────────────────────────────────────────

/// A vendor update stream tracked per phase and observed version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub vendor: Vendor,
    pub channel: ReleaseChannel,
    pub phase: ChannelPhase,
    /// Free-text `<operator>/<runtime>` version pair, e.g. `v24.9.0/12.4.1`.
    pub observed_version: String,
    pub cluster_count: u32,
    /// Set on create, advanced on every update.
    pub last_updated: DateTime<Utc>,
}

/// Fields supplied when creating a channel; the data source assigns
/// `id` and `lastUpdated`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewChannel {
    pub name: String,
    pub vendor: Vendor,
    pub channel: ReleaseChannel,
    pub phase: ChannelPhase,
    pub observed_version: String,
    pub cluster_count: u32,
}

/// Partial channel update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Vendor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<ReleaseChannel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<ChannelPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_count: Option<u32>,
}

impl NewChannel {
    /// Materialize the stored record.
    pub fn into_channel(self, id: ChannelId, last_updated: DateTime<Utc>) -> Channel {
        let NewChannel {
            name,
            vendor,
            channel,
            phase,
            observed_version,
            cluster_count,
        } = self;
        Channel {
            id,
            name,
            vendor,
            channel,
            phase,
            observed_version,
            cluster_count,
            last_updated,
        }
    }
}

impl ChannelPatch {
    /// Patch that only moves the phase.
    pub fn phase(phase: ChannelPhase) -> Self {
        Self {
            phase: Some(phase),
            ..Self::default()
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merge the set fields over `channel`.
    ///
    /// `lastUpdated` is left to the caller, which owns the clock.
    pub fn apply_to(self, channel: &mut Channel) {
        let ChannelPatch {
            name,
            vendor,
            channel: release,
            phase,
            observed_version,
            cluster_count,
        } = self;
        if let Some(name) = name {
            channel.name = name;
        }
        if let Some(vendor) = vendor {
            channel.vendor = vendor;
        }
        if let Some(release) = release {
            channel.channel = release;
        }
        if let Some(phase) = phase {
            channel.phase = phase;
        }
        if let Some(observed_version) = observed_version {
            channel.observed_version = observed_version;
        }
        if let Some(cluster_count) = cluster_count {
            channel.cluster_count = cluster_count;
        }
    }
}

// ── Cluster ───────────────────────────────────────────────────────

/// A compute cluster with GPU resources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: ClusterId,
    pub name: String,
    pub vendor: Vendor,
    pub gpu_count: u32,
    /// Free-text GPU model, e.g. `NVIDIA A100 80GB`.
    pub gpu_type: String,
    /// Multi-Instance GPU partitioning enabled.
    pub mig_enabled: bool,
    pub status: ClusterStatus,
}

// ── Observed records ──────────────────────────────────────────────

/// A channel's bundle applied to one cluster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BundleDeployment {
    pub id: String,
    pub channel_id: ChannelId,
    pub cluster_id: ClusterId,
    pub status: DeploymentStatus,
    pub message: String,
    pub last_transition_time: DateTime<Utc>,
}

/// Detected divergence between a cluster and its channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriftEvent {
    pub id: String,
    pub channel_id: ChannelId,
    pub cluster_id: ClusterId,
    #[serde(rename = "type")]
    pub kind: DriftKind,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Breach of an administrative policy by a resource on a cluster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyViolation {
    pub id: String,
    pub cluster_id: ClusterId,
    /// Policy name, e.g. `limit-gpu-per-pod`.
    pub policy: String,
    /// Offending resource, e.g. `pod/vllm-inference`.
    pub resource: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
