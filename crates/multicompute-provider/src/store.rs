//! MockStore: in-memory collections behind the mock data source.
//!
//! Each store owns its five ordered collections outright; nothing is
//! process-global, so independent stores never observe each other's
//! writes. Reads return copies. Lookups are linear scans by id.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use multicompute_model::*;

use crate::error::{ProviderError, ProviderResult};
use crate::seed;

/// Prefix of ids assigned to created channels.
const CHANNEL_ID_PREFIX: &str = "channel";

/// Owned in-memory dataset.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    channels: Vec<Channel>,
    clusters: Vec<Cluster>,
    bundle_deployments: Vec<BundleDeployment>,
    drift_events: Vec<DriftEvent>,
    policy_violations: Vec<PolicyViolation>,
    /// Per-store sequence appended to generated channel ids.
    next_seq: u64,
    /// Last timestamp handed out; later stamps never go backwards.
    last_stamp: Option<DateTime<Utc>>,
}

/// Copy the items whose foreign key equals `filter`, or all of them.
/// An empty filter id means no filter.
fn filtered<T: Clone>(items: &[T], filter: Option<&str>, key: impl Fn(&T) -> &str) -> Vec<T> {
    match filter.filter(|id| !id.is_empty()) {
        Some(id) => items.iter().filter(|item| key(item) == id).cloned().collect(),
        None => items.to_vec(),
    }
}

impl MockStore {
    /// Store loaded with the fixture dataset.
    pub fn seeded() -> Self {
        let store = Self {
            channels: seed::channels(),
            clusters: seed::clusters(),
            bundle_deployments: seed::bundle_deployments(),
            drift_events: seed::drift_events(),
            policy_violations: seed::policy_violations(),
            ..Self::default()
        };
        debug!(
            channels = store.channels.len(),
            clusters = store.clusters.len(),
            "mock store seeded"
        );
        store
    }

    /// Store with every collection empty.
    pub fn empty() -> Self {
        Self::default()
    }

    // ── Reads ──────────────────────────────────────────────────────

    pub fn list_channels(&self) -> Vec<Channel> {
        self.channels.clone()
    }

    pub fn list_clusters(&self) -> Vec<Cluster> {
        self.clusters.clone()
    }

    pub fn list_bundle_deployments(&self, channel_id: Option<&str>) -> Vec<BundleDeployment> {
        filtered(&self.bundle_deployments, channel_id, |bd| bd.channel_id.as_str())
    }

    pub fn list_drift_events(&self, channel_id: Option<&str>) -> Vec<DriftEvent> {
        filtered(&self.drift_events, channel_id, |event| event.channel_id.as_str())
    }

    pub fn list_policy_violations(&self, cluster_id: Option<&str>) -> Vec<PolicyViolation> {
        filtered(&self.policy_violations, cluster_id, |violation| {
            violation.cluster_id.as_str()
        })
    }

    // ── Channel mutations ──────────────────────────────────────────

    /// Append a new channel with a fresh id and timestamp.
    pub fn create_channel(&mut self, draft: NewChannel) -> Channel {
        let now = self.stamp();
        let id = self.next_channel_id(now);
        let channel = draft.into_channel(id, now);
        self.channels.push(channel.clone());
        debug!(id = %channel.id, "channel created");
        channel
    }

    /// Merge `patch` into the channel with `id` and refresh `lastUpdated`.
    pub fn update_channel(&mut self, id: &str, patch: ChannelPatch) -> ProviderResult<Channel> {
        let index = self.channel_index(id)?;
        let now = self.stamp();
        let channel = &mut self.channels[index];
        patch.apply_to(channel);
        channel.last_updated = now;
        debug!(%id, phase = %channel.phase, "channel updated");
        Ok(channel.clone())
    }

    /// Remove the channel with `id`, keeping the order of the rest.
    pub fn delete_channel(&mut self, id: &str) -> ProviderResult<()> {
        let index = self.channel_index(id)?;
        self.channels.remove(index);
        debug!(%id, "channel deleted");
        Ok(())
    }

    fn channel_index(&self, id: &str) -> ProviderResult<usize> {
        self.channels
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ProviderError::NotFound(id.to_string()))
    }

    /// `channel-<unix millis>-<seq>`; the sequence keeps ids distinct
    /// when two creates land in the same millisecond.
    fn next_channel_id(&mut self, now: DateTime<Utc>) -> String {
        let seq = self.next_seq;
        self.next_seq += 1;
        format!("{CHANNEL_ID_PREFIX}-{}-{seq}", now.timestamp_millis())
    }

    /// Current time, nudged forward past the previous stamp if the clock
    /// has not advanced.
    fn stamp(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_stamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_stamp = Some(now);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> NewChannel {
        NewChannel {
            name: name.to_string(),
            vendor: Vendor::Nvidia,
            channel: ReleaseChannel::Stable,
            phase: ChannelPhase::Pending,
            observed_version: "v1/v1".to_string(),
            cluster_count: 0,
        }
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|item| id(item).to_string()).collect()
    }

    // ── Seed ───────────────────────────────────────────────────────

    #[test]
    fn seeded_collections_in_insertion_order() {
        let store = MockStore::seeded();

        assert_eq!(
            ids(&store.list_channels(), |c| c.id.as_str()),
            ["nvidia-stable", "amd-lts", "intel-canary"]
        );
        assert_eq!(
            ids(&store.list_clusters(), |c| c.id.as_str()),
            ["cluster-1", "cluster-2", "cluster-3", "cluster-4"]
        );
        assert_eq!(
            ids(&store.list_bundle_deployments(None), |bd| bd.id.as_str()),
            ["bd-1", "bd-2", "bd-3", "bd-4"]
        );
        assert_eq!(
            ids(&store.list_drift_events(None), |e| e.id.as_str()),
            ["drift-1", "drift-2"]
        );
        assert_eq!(
            ids(&store.list_policy_violations(None), |v| v.id.as_str()),
            ["violation-1", "violation-2"]
        );
    }

    #[test]
    fn empty_store_operations() {
        let mut store = MockStore::empty();
        assert!(store.list_channels().is_empty());
        assert!(store.list_bundle_deployments(Some("nvidia-stable")).is_empty());
        assert!(matches!(
            store.delete_channel("nope"),
            Err(ProviderError::NotFound(_))
        ));
    }

    // ── Filters ────────────────────────────────────────────────────

    #[test]
    fn bundle_filter_is_subset_of_unfiltered() {
        let store = MockStore::seeded();
        let all = store.list_bundle_deployments(None);
        let nvidia = store.list_bundle_deployments(Some("nvidia-stable"));

        let expected: Vec<_> = all
            .iter()
            .filter(|bd| bd.channel_id == "nvidia-stable")
            .cloned()
            .collect();
        assert_eq!(nvidia, expected);
        assert_eq!(ids(&nvidia, |bd| bd.id.as_str()), ["bd-1", "bd-2"]);
    }

    #[test]
    fn filter_without_matches_is_empty() {
        let store = MockStore::seeded();
        assert!(store.list_bundle_deployments(Some("missing")).is_empty());
        assert!(store.list_drift_events(Some("intel-canary")).is_empty());
        assert!(store.list_policy_violations(Some("cluster-4")).is_empty());
    }

    #[test]
    fn empty_filter_id_returns_everything() {
        let store = MockStore::seeded();
        assert_eq!(
            store.list_bundle_deployments(Some("")),
            store.list_bundle_deployments(None)
        );
        assert_eq!(store.list_drift_events(Some("")).len(), 2);
        assert_eq!(store.list_policy_violations(Some("")).len(), 2);
    }

    #[test]
    fn drift_and_violation_filters() {
        let store = MockStore::seeded();
        assert_eq!(ids(&store.list_drift_events(Some("amd-lts")), |e| e.id.as_str()), ["drift-2"]);
        assert_eq!(
            ids(&store.list_policy_violations(Some("cluster-2")), |v| v.id.as_str()),
            ["violation-2"]
        );
    }

    // ── Create ─────────────────────────────────────────────────────

    #[test]
    fn create_appends_with_generated_id() {
        let mut store = MockStore::seeded();
        let created = store.create_channel(draft("Test"));

        assert!(created.id.starts_with("channel-"));
        let channels = store.list_channels();
        assert_eq!(channels.len(), 4);
        assert_eq!(channels.last(), Some(&created));
    }

    #[test]
    fn rapid_creates_get_distinct_ids_and_rising_stamps() {
        let mut store = MockStore::empty();
        let a = store.create_channel(draft("a"));
        let b = store.create_channel(draft("b"));
        let c = store.create_channel(draft("c"));

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert!(a.last_updated < b.last_updated);
        assert!(b.last_updated < c.last_updated);
    }

    // ── Update ─────────────────────────────────────────────────────

    #[test]
    fn update_changes_only_patched_fields_and_stamp() {
        let mut store = MockStore::seeded();
        let before = store.list_channels()[1].clone();

        let updated = store
            .update_channel("amd-lts", ChannelPatch::phase(ChannelPhase::Succeeded))
            .unwrap();

        assert_eq!(updated.phase, ChannelPhase::Succeeded);
        assert!(updated.last_updated > before.last_updated);
        assert_eq!(
            Channel {
                phase: before.phase,
                last_updated: before.last_updated,
                ..updated.clone()
            },
            before
        );
        assert_eq!(store.list_channels()[1], updated);
    }

    #[test]
    fn update_unknown_id_leaves_store_untouched() {
        let mut store = MockStore::seeded();
        let before = store.list_channels();

        let err = store
            .update_channel("nope", ChannelPatch::phase(ChannelPhase::Failed))
            .unwrap_err();

        assert!(matches!(err, ProviderError::NotFound(ref id) if id == "nope"));
        assert_eq!(store.list_channels(), before);
    }

    // ── Delete ─────────────────────────────────────────────────────

    #[test]
    fn delete_preserves_order_of_remaining() {
        let mut store = MockStore::seeded();
        store.delete_channel("amd-lts").unwrap();
        assert_eq!(
            ids(&store.list_channels(), |c| c.id.as_str()),
            ["nvidia-stable", "intel-canary"]
        );
    }

    #[test]
    fn delete_twice_fails_second_time() {
        let mut store = MockStore::seeded();
        store.delete_channel("nvidia-stable").unwrap();
        assert!(matches!(
            store.delete_channel("nvidia-stable"),
            Err(ProviderError::NotFound(_))
        ));
        assert_eq!(store.list_channels().len(), 2);
    }

    #[test]
    fn stores_are_independent() {
        let mut a = MockStore::seeded();
        let b = MockStore::seeded();
        a.delete_channel("intel-canary").unwrap();
        assert_eq!(a.list_channels().len(), 2);
        assert_eq!(b.list_channels().len(), 3);
    }
}
