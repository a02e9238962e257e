//! The DataProvider contract shared by the mock and remote sources.

use async_trait::async_trait;
use multicompute_model::{
    BundleDeployment, Channel, ChannelPatch, Cluster, DriftEvent, NewChannel, PolicyViolation,
};

use crate::error::ProviderResult;

/// Backend for dashboard data.
///
/// Filters are optional foreign-key equality matches; a filter with no
/// matches yields an empty vector, never an error. Only channels are
/// mutable.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn get_channels(&self) -> ProviderResult<Vec<Channel>>;

    async fn get_clusters(&self) -> ProviderResult<Vec<Cluster>>;

    /// Bundle deployments, restricted to `channel_id` when given.
    async fn get_bundle_deployments(
        &self,
        channel_id: Option<&str>,
    ) -> ProviderResult<Vec<BundleDeployment>>;

    /// Drift events, restricted to `channel_id` when given.
    async fn get_drift_events(&self, channel_id: Option<&str>) -> ProviderResult<Vec<DriftEvent>>;

    /// Policy violations, restricted to `cluster_id` when given.
    async fn get_policy_violations(
        &self,
        cluster_id: Option<&str>,
    ) -> ProviderResult<Vec<PolicyViolation>>;

    /// Store a new channel. The source assigns `id` and `lastUpdated`.
    async fn create_channel(&self, channel: NewChannel) -> ProviderResult<Channel>;

    /// Merge `updates` over an existing channel and refresh `lastUpdated`.
    async fn update_channel(&self, id: &str, updates: ChannelPatch) -> ProviderResult<Channel>;

    async fn delete_channel(&self, id: &str) -> ProviderResult<()>;
}
