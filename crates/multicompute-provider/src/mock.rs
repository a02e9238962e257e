//! MockProvider: DataProvider over an owned in-memory store.
//!
//! Completes without suspending; the async signature only keeps the
//! calling convention identical to the remote source.

use async_trait::async_trait;
use tokio::sync::RwLock;

use multicompute_model::{
    BundleDeployment, Channel, ChannelPatch, Cluster, DriftEvent, NewChannel, PolicyViolation,
};

use crate::error::ProviderResult;
use crate::provider::DataProvider;
use crate::store::MockStore;

/// Data source backed by a [`MockStore`].
#[derive(Debug)]
pub struct MockProvider {
    store: RwLock<MockStore>,
}

impl MockProvider {
    /// Provider over the fixture dataset.
    pub fn new() -> Self {
        Self::with_store(MockStore::seeded())
    }

    /// Provider over a caller-built store.
    pub fn with_store(store: MockStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn get_channels(&self) -> ProviderResult<Vec<Channel>> {
        Ok(self.store.read().await.list_channels())
    }

    async fn get_clusters(&self) -> ProviderResult<Vec<Cluster>> {
        Ok(self.store.read().await.list_clusters())
    }

    async fn get_bundle_deployments(
        &self,
        channel_id: Option<&str>,
    ) -> ProviderResult<Vec<BundleDeployment>> {
        Ok(self.store.read().await.list_bundle_deployments(channel_id))
    }

    async fn get_drift_events(&self, channel_id: Option<&str>) -> ProviderResult<Vec<DriftEvent>> {
        Ok(self.store.read().await.list_drift_events(channel_id))
    }

    async fn get_policy_violations(
        &self,
        cluster_id: Option<&str>,
    ) -> ProviderResult<Vec<PolicyViolation>> {
        Ok(self.store.read().await.list_policy_violations(cluster_id))
    }

    async fn create_channel(&self, channel: NewChannel) -> ProviderResult<Channel> {
        Ok(self.store.write().await.create_channel(channel))
    }

    async fn update_channel(&self, id: &str, updates: ChannelPatch) -> ProviderResult<Channel> {
        self.store.write().await.update_channel(id, updates)
    }

    async fn delete_channel(&self, id: &str) -> ProviderResult<()> {
        self.store.write().await.delete_channel(id)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use multicompute_model::{ChannelPhase, ReleaseChannel, Vendor};

    use super::*;
    use crate::error::ProviderError;

    fn test_draft() -> NewChannel {
        NewChannel {
            name: "Test".to_string(),
            vendor: Vendor::Nvidia,
            channel: ReleaseChannel::Stable,
            phase: ChannelPhase::Pending,
            observed_version: "v1/v1".to_string(),
            cluster_count: 0,
        }
    }

    #[tokio::test]
    async fn fresh_provider_returns_seed() {
        let provider = MockProvider::new();
        assert_eq!(provider.get_channels().await.unwrap().len(), 3);
        assert_eq!(provider.get_clusters().await.unwrap().len(), 4);
        assert_eq!(provider.get_bundle_deployments(None).await.unwrap().len(), 4);
        assert_eq!(provider.get_drift_events(None).await.unwrap().len(), 2);
        assert_eq!(provider.get_policy_violations(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_then_read_round_trip() {
        let provider = MockProvider::new();
        let before = Utc::now();
        tokio::time::sleep(Duration::from_millis(2)).await;

        let created = provider.create_channel(test_draft()).await.unwrap();

        let channels = provider.get_channels().await.unwrap();
        let named: Vec<_> = channels.iter().filter(|c| c.name == "Test").collect();
        assert_eq!(named.len(), 1);
        assert_eq!(named[0], &created);
        assert!(created.last_updated > before);
        assert!(channels[..3].iter().all(|c| c.id != created.id));
    }

    #[tokio::test]
    async fn update_through_trait_object() {
        let provider: Box<dyn DataProvider> = Box::new(MockProvider::new());
        let updated = provider
            .update_channel("intel-canary", ChannelPatch::phase(ChannelPhase::Progressing))
            .await
            .unwrap();
        assert_eq!(updated.phase, ChannelPhase::Progressing);
        assert_eq!(updated.name, "Intel Canary");

        let err = provider
            .update_channel("nope", ChannelPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_twice() {
        let provider = MockProvider::new();
        provider.delete_channel("amd-lts").await.unwrap();
        let err = provider.delete_channel("amd-lts").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));
    }

    #[tokio::test]
    async fn instances_do_not_share_state() {
        let a = MockProvider::new();
        let b = MockProvider::new();
        a.create_channel(test_draft()).await.unwrap();
        assert_eq!(a.get_channels().await.unwrap().len(), 4);
        assert_eq!(b.get_channels().await.unwrap().len(), 3);
    }
}
