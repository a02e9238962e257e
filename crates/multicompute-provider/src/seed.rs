//! Fixture data loaded into a fresh mock store.
//!
//! Three channels, four clusters, four bundle deployments, two drift
//! events, two policy violations. Values are sample data, not protocol.

use chrono::{DateTime, TimeZone, Utc};
use multicompute_model::*;

/// All fixture timestamps fall on 2024-01-15 (UTC).
fn jan15(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

pub fn channels() -> Vec<Channel> {
    vec![
        Channel {
            id: "nvidia-stable".to_string(),
            name: "NVIDIA Stable".to_string(),
            vendor: Vendor::Nvidia,
            channel: ReleaseChannel::Stable,
            phase: ChannelPhase::Succeeded,
            observed_version: "v24.9.0/12.4.1".to_string(),
            cluster_count: 3,
            last_updated: jan15(10, 30),
        },
        Channel {
            id: "amd-lts".to_string(),
            name: "AMD LTS".to_string(),
            vendor: Vendor::Amd,
            channel: ReleaseChannel::Lts,
            phase: ChannelPhase::Progressing,
            observed_version: "v0.9.0/5.6.0".to_string(),
            cluster_count: 2,
            last_updated: jan15(9, 15),
        },
        Channel {
            id: "intel-canary".to_string(),
            name: "Intel Canary".to_string(),
            vendor: Vendor::Intel,
            channel: ReleaseChannel::Canary,
            phase: ChannelPhase::Failed,
            observed_version: "v0.5.0-rc1/23.4.0-rc1".to_string(),
            cluster_count: 1,
            last_updated: jan15(8, 45),
        },
    ]
}

pub fn clusters() -> Vec<Cluster> {
    let cluster = |id: &str, name: &str, vendor, gpu_count, gpu_type: &str, mig, status| Cluster {
        id: id.to_string(),
        name: name.to_string(),
        vendor,
        gpu_count,
        gpu_type: gpu_type.to_string(),
        mig_enabled: mig,
        status,
    };
    vec![
        cluster(
            "cluster-1",
            "GPU Cluster 1",
            Vendor::Nvidia,
            8,
            "NVIDIA A100 80GB",
            true,
            ClusterStatus::Ready,
        ),
        cluster(
            "cluster-2",
            "GPU Cluster 2",
            Vendor::Nvidia,
            4,
            "NVIDIA RTX 4090",
            false,
            ClusterStatus::Ready,
        ),
        cluster(
            "cluster-3",
            "AMD Cluster 1",
            Vendor::Amd,
            4,
            "AMD Radeon RX 7900 XTX",
            false,
            ClusterStatus::Ready,
        ),
        cluster(
            "cluster-4",
            "Intel Cluster 1",
            Vendor::Intel,
            2,
            "Intel Arc A770",
            false,
            ClusterStatus::NotReady,
        ),
    ]
}

pub fn bundle_deployments() -> Vec<BundleDeployment> {
    let bundle = |id: &str, channel_id: &str, cluster_id: &str, status, message: &str, at| {
        BundleDeployment {
            id: id.to_string(),
            channel_id: channel_id.to_string(),
            cluster_id: cluster_id.to_string(),
            status,
            message: message.to_string(),
            last_transition_time: at,
        }
    };
    vec![
        bundle(
            "bd-1",
            "nvidia-stable",
            "cluster-1",
            DeploymentStatus::Ready,
            "Bundle deployed successfully",
            jan15(10, 30),
        ),
        bundle(
            "bd-2",
            "nvidia-stable",
            "cluster-2",
            DeploymentStatus::Ready,
            "Bundle deployed successfully",
            jan15(10, 25),
        ),
        bundle(
            "bd-3",
            "amd-lts",
            "cluster-3",
            DeploymentStatus::Progressing,
            "Bundle deployment in progress",
            jan15(9, 15),
        ),
        bundle(
            "bd-4",
            "intel-canary",
            "cluster-4",
            DeploymentStatus::Failed,
            "Bundle deployment failed: GPU driver not found",
            jan15(8, 45),
        ),
    ]
}

pub fn drift_events() -> Vec<DriftEvent> {
    vec![
        DriftEvent {
            id: "drift-1".to_string(),
            channel_id: "nvidia-stable".to_string(),
            cluster_id: "cluster-1".to_string(),
            kind: DriftKind::VersionMismatch,
            severity: Severity::Medium,
            message: "Cluster running v24.8.0 but channel specifies v24.9.0".to_string(),
            timestamp: jan15(11, 0),
        },
        DriftEvent {
            id: "drift-2".to_string(),
            channel_id: "amd-lts".to_string(),
            cluster_id: "cluster-3".to_string(),
            kind: DriftKind::ConfigurationDrift,
            severity: Severity::Low,
            message: "GPU memory limit changed from 8GB to 16GB".to_string(),
            timestamp: jan15(10, 45),
        },
    ]
}

pub fn policy_violations() -> Vec<PolicyViolation> {
    vec![
        PolicyViolation {
            id: "violation-1".to_string(),
            cluster_id: "cluster-1".to_string(),
            policy: "limit-gpu-per-pod".to_string(),
            resource: "pod/vllm-inference".to_string(),
            message: "Pod requests 8 GPUs but policy limits to 4".to_string(),
            timestamp: jan15(12, 0),
        },
        PolicyViolation {
            id: "violation-2".to_string(),
            cluster_id: "cluster-2".to_string(),
            policy: "require-runtime-class".to_string(),
            resource: "pod/pytorch-training".to_string(),
            message: "Pod missing required runtime class".to_string(),
            timestamp: jan15(11, 30),
        },
    ]
}
