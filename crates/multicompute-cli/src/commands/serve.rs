use std::net::SocketAddr;
use std::sync::Arc;

use multicompute_provider::MockProvider;
use tracing::info;

/// Router over a freshly seeded mock dataset. Provider configuration
/// never selects what `serve` exposes.
pub fn router(base_path: &str) -> axum::Router {
    multicompute_api::build_router_at(Arc::new(MockProvider::new()), base_path)
}

pub async fn serve(port: u16, base_path: &str) -> anyhow::Result<()> {
    let router = router(base_path);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, %base_path, "API server starting over the mock dataset");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    info!("API server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use multicompute_provider::{DataProvider, LiveConfig, LiveProvider};

    use super::*;

    #[tokio::test]
    async fn serves_seeded_mock_even_when_live_points_here() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router("/api/v1")).await.unwrap();
        });

        let client = LiveProvider::new(LiveConfig::new(addr.to_string()));
        let channels = tokio::time::timeout(Duration::from_secs(5), client.get_channels())
            .await
            .expect("server answered without calling itself")
            .unwrap();

        let ids: Vec<_> = channels.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["nvidia-stable", "amd-lts", "intel-canary"]);
    }

    #[tokio::test]
    async fn custom_base_path() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router("/v2")).await.unwrap();
        });

        let client = LiveProvider::new(LiveConfig::new(addr.to_string()).with_base_path("/v2"));
        assert_eq!(client.get_clusters().await.unwrap().len(), 4);
    }
}
