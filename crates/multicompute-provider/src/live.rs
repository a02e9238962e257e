//! LiveProvider: DataProvider over the dashboard REST backend.
//!
//! One request per operation under the configured base path:
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | channels | GET | `/channels` |
//! | clusters | GET | `/clusters` |
//! | bundle deployments | GET | `/bundle-deployments` or `/channels/{id}/bundle-deployments` |
//! | drift events | GET | `/drift-events` or `/channels/{id}/drift-events` |
//! | policy violations | GET | `/policy-violations` or `/clusters/{id}/policy-violations` |
//! | create channel | POST | `/channels` |
//! | update channel | PATCH | `/channels/{id}` |
//! | delete channel | DELETE | `/channels/{id}` |
//!
//! Successful bodies are decoded as-is; any status outside 200–299 becomes
//! [`ProviderError::RequestFailed`].

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue, Method, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use multicompute_model::{
    BundleDeployment, Channel, ChannelPatch, Cluster, DriftEvent, NewChannel, PolicyViolation,
};

use crate::config::LiveConfig;
use crate::error::{ProviderError, ProviderResult, map_err};
use crate::provider::DataProvider;
use crate::transport::{HttpTransport, HyperTransport};

/// Data source that forwards every operation to the REST backend.
#[derive(Clone)]
pub struct LiveProvider {
    config: LiveConfig,
    transport: Arc<dyn HttpTransport>,
}

impl LiveProvider {
    /// Provider over a fresh-connection-per-request HTTP/1.1 transport.
    pub fn new(config: LiveConfig) -> Self {
        Self::with_transport(config, Arc::new(HyperTransport))
    }

    pub fn with_transport(config: LiveConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &LiveConfig {
        &self.config
    }

    /// Absolute URL for an endpoint below the base path.
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "http://{}{}{}",
            self.config.server,
            self.config.normalized_base_path(),
            endpoint
        )
    }

    fn build_request(
        &self,
        method: &Method,
        endpoint: &str,
        body: Bytes,
    ) -> ProviderResult<Request<Bytes>> {
        let mut request = Request::builder()
            .method(method.clone())
            .uri(self.url(endpoint))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .map_err(map_err!(InvalidRequest))?;

        let headers = request.headers_mut();
        for (name, value) in &self.config.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(map_err!(InvalidRequest))?;
            let value = HeaderValue::from_str(value).map_err(map_err!(InvalidRequest))?;
            headers.insert(name, value);
        }
        Ok(request)
    }

    /// Issue one request and return the body of a 2xx response.
    async fn send(&self, method: Method, endpoint: &str, body: Bytes) -> ProviderResult<Bytes> {
        let request = self.build_request(&method, endpoint, body)?;
        let response = self.transport.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%method, %endpoint, status = status.as_u16(), "request failed");
            return Err(ProviderError::RequestFailed {
                status: status.as_u16(),
            });
        }
        debug!(%method, %endpoint, status = status.as_u16(), "request succeeded");
        Ok(response.into_body())
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ProviderResult<T> {
        let body = self.send(Method::GET, endpoint, Bytes::new()).await?;
        decode(&body)
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        payload: &B,
    ) -> ProviderResult<T> {
        let body = serde_json::to_vec(payload).map_err(map_err!(Encode))?;
        let body = self.send(method, endpoint, Bytes::from(body)).await?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ProviderResult<T> {
    serde_json::from_slice(body).map_err(map_err!(Decode))
}

/// Percent-encode an id for use as one path segment.
fn segment(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for byte in id.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

/// `/{parent}/{id}/{collection}` for a non-empty filter id,
/// `/{collection}` otherwise.
fn filtered_endpoint(parent: &str, filter: Option<&str>, collection: &str) -> String {
    match filter.filter(|id| !id.is_empty()) {
        Some(id) => format!("/{parent}/{}/{collection}", segment(id)),
        None => format!("/{collection}"),
    }
}

#[async_trait]
impl DataProvider for LiveProvider {
    async fn get_channels(&self) -> ProviderResult<Vec<Channel>> {
        self.get("/channels").await
    }

    async fn get_clusters(&self) -> ProviderResult<Vec<Cluster>> {
        self.get("/clusters").await
    }

    async fn get_bundle_deployments(
        &self,
        channel_id: Option<&str>,
    ) -> ProviderResult<Vec<BundleDeployment>> {
        self.get(&filtered_endpoint("channels", channel_id, "bundle-deployments"))
            .await
    }

    async fn get_drift_events(&self, channel_id: Option<&str>) -> ProviderResult<Vec<DriftEvent>> {
        self.get(&filtered_endpoint("channels", channel_id, "drift-events"))
            .await
    }

    async fn get_policy_violations(
        &self,
        cluster_id: Option<&str>,
    ) -> ProviderResult<Vec<PolicyViolation>> {
        self.get(&filtered_endpoint("clusters", cluster_id, "policy-violations"))
            .await
    }

    async fn create_channel(&self, channel: NewChannel) -> ProviderResult<Channel> {
        self.send_json(Method::POST, "/channels", &channel).await
    }

    async fn update_channel(&self, id: &str, updates: ChannelPatch) -> ProviderResult<Channel> {
        let endpoint = format!("/channels/{}", segment(id));
        self.send_json(Method::PATCH, &endpoint, &updates).await
    }

    async fn delete_channel(&self, id: &str) -> ProviderResult<()> {
        let endpoint = format!("/channels/{}", segment(id));
        self.send(Method::DELETE, &endpoint, Bytes::new()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use http::{Response, StatusCode};
    use multicompute_model::{ChannelPhase, ReleaseChannel, Vendor};

    use super::*;
    use crate::seed;

    /// Records every request and answers with one canned response.
    struct RecordingTransport {
        status: StatusCode,
        body: Bytes,
        requests: Mutex<Vec<Request<Bytes>>>,
    }

    impl RecordingTransport {
        fn new(status: StatusCode, body: impl Into<Bytes>) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.into(),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn json(value: &impl Serialize) -> Arc<Self> {
            Self::new(StatusCode::OK, serde_json::to_vec(value).unwrap())
        }

        fn requests(&self) -> Vec<(Method, String, Bytes)> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| (r.method().clone(), r.uri().path().to_string(), r.body().clone()))
                .collect()
        }

        fn header(&self, name: &str) -> Option<String> {
            let requests = self.requests.lock().unwrap();
            let value = requests.last()?.headers().get(name)?;
            Some(value.to_str().ok()?.to_string())
        }
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn send(&self, request: Request<Bytes>) -> ProviderResult<Response<Bytes>> {
            self.requests.lock().unwrap().push(request);
            Ok(Response::builder()
                .status(self.status)
                .body(self.body.clone())
                .unwrap())
        }
    }

    fn provider(transport: Arc<RecordingTransport>) -> LiveProvider {
        LiveProvider::with_transport(LiveConfig::new("dash:8080"), transport)
    }

    #[tokio::test]
    async fn bundle_deployments_by_channel_uses_nested_path() {
        let expected: Vec<_> = seed::bundle_deployments()
            .into_iter()
            .filter(|bd| bd.channel_id == "nvidia-stable")
            .collect();
        let transport = RecordingTransport::json(&expected);

        let result = provider(transport.clone())
            .get_bundle_deployments(Some("nvidia-stable"))
            .await
            .unwrap();

        assert_eq!(result, expected);
        assert_eq!(
            transport.requests(),
            vec![(
                Method::GET,
                "/api/v1/channels/nvidia-stable/bundle-deployments".to_string(),
                Bytes::new()
            )]
        );
    }

    #[tokio::test]
    async fn read_paths_per_operation() {
        let transport = RecordingTransport::json(&Vec::<Channel>::new());
        let provider = provider(transport.clone());

        provider.get_channels().await.unwrap();
        provider.get_clusters().await.unwrap();
        provider.get_bundle_deployments(None).await.unwrap();
        provider.get_drift_events(None).await.unwrap();
        provider.get_drift_events(Some("amd-lts")).await.unwrap();
        provider.get_policy_violations(None).await.unwrap();
        provider.get_policy_violations(Some("cluster-1")).await.unwrap();

        let paths: Vec<_> = transport.requests().into_iter().map(|(_, p, _)| p).collect();
        assert_eq!(
            paths,
            [
                "/api/v1/channels",
                "/api/v1/clusters",
                "/api/v1/bundle-deployments",
                "/api/v1/drift-events",
                "/api/v1/channels/amd-lts/drift-events",
                "/api/v1/policy-violations",
                "/api/v1/clusters/cluster-1/policy-violations",
            ]
        );
    }

    #[tokio::test]
    async fn empty_filter_id_uses_flat_path() {
        let transport = RecordingTransport::json(&Vec::<BundleDeployment>::new());
        let provider = provider(transport.clone());

        provider.get_bundle_deployments(Some("")).await.unwrap();
        provider.get_drift_events(Some("")).await.unwrap();
        provider.get_policy_violations(Some("")).await.unwrap();

        let paths: Vec<_> = transport.requests().into_iter().map(|(_, p, _)| p).collect();
        assert_eq!(
            paths,
            [
                "/api/v1/bundle-deployments",
                "/api/v1/drift-events",
                "/api/v1/policy-violations",
            ]
        );
    }

    #[tokio::test]
    async fn not_found_status_surfaces_as_request_failed() {
        let transport = RecordingTransport::new(StatusCode::NOT_FOUND, "{}");
        let err = provider(transport).get_channels().await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn server_error_carries_status() {
        let transport = RecordingTransport::new(StatusCode::INTERNAL_SERVER_ERROR, "");
        let err = provider(transport).delete_channel("amd-lts").await.unwrap_err();
        assert!(matches!(err, ProviderError::RequestFailed { status: 500 }));
    }

    #[tokio::test]
    async fn create_posts_json_body() {
        let stored = seed::channels().remove(0);
        let transport = RecordingTransport::json(&stored);
        let draft = NewChannel {
            name: "Test".to_string(),
            vendor: Vendor::Nvidia,
            channel: ReleaseChannel::Stable,
            phase: ChannelPhase::Pending,
            observed_version: "v1/v1".to_string(),
            cluster_count: 0,
        };

        let created = provider(transport.clone()).create_channel(draft.clone()).await.unwrap();

        assert_eq!(created, stored);
        let (method, path, body) = transport.requests().remove(0);
        assert_eq!(method, Method::POST);
        assert_eq!(path, "/api/v1/channels");
        let sent: NewChannel = serde_json::from_slice(&body).unwrap();
        assert_eq!(sent, draft);
        assert_eq!(transport.header("content-type").as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn update_patches_only_set_fields() {
        let transport = RecordingTransport::json(&seed::channels().remove(1));
        provider(transport.clone())
            .update_channel("amd-lts", ChannelPatch::phase(ChannelPhase::Succeeded))
            .await
            .unwrap();

        let (method, path, body) = transport.requests().remove(0);
        assert_eq!(method, Method::PATCH);
        assert_eq!(path, "/api/v1/channels/amd-lts");
        assert_eq!(&body[..], br#"{"phase":"Succeeded"}"#);
    }

    #[tokio::test]
    async fn delete_ignores_empty_body() {
        let transport = RecordingTransport::new(StatusCode::NO_CONTENT, "");
        provider(transport.clone()).delete_channel("intel-canary").await.unwrap();
        let (method, path, _) = transport.requests().remove(0);
        assert_eq!(method, Method::DELETE);
        assert_eq!(path, "/api/v1/channels/intel-canary");
    }

    #[tokio::test]
    async fn undecodable_body_is_decode_error() {
        let transport = RecordingTransport::new(StatusCode::OK, "not json");
        let err = provider(transport).get_clusters().await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn header_overrides_win() {
        let transport = RecordingTransport::json(&Vec::<Cluster>::new());
        let config = LiveConfig::new("dash:8080")
            .with_base_path("/v2/")
            .with_header("content-type", "application/vnd.gpu+json")
            .with_header("x-tenant", "gpu-team");
        let provider = LiveProvider::with_transport(config, transport.clone());

        provider.get_clusters().await.unwrap();

        assert_eq!(transport.requests()[0].1, "/v2/clusters");
        assert_eq!(
            transport.header("content-type").as_deref(),
            Some("application/vnd.gpu+json")
        );
        assert_eq!(transport.header("x-tenant").as_deref(), Some("gpu-team"));
    }

    #[test]
    fn ids_are_escaped_as_one_segment() {
        assert_eq!(segment("nvidia-stable"), "nvidia-stable");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn url_includes_server_and_base_path() {
        let provider = LiveProvider::new(LiveConfig::default());
        assert_eq!(
            provider.url("/channels"),
            "http://127.0.0.1:8080/api/v1/channels"
        );
    }
}
