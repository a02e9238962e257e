//! multicompute-api — REST API for the MultiCompute dashboard.
//!
//! Serves the dashboard's HTTP surface from any [`DataProvider`], so the
//! live provider has a backend to talk to and the mock dataset can be
//! exposed over the network.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/v1/channels` | List channels |
//! | POST | `/api/v1/channels` | Create a channel |
//! | PATCH | `/api/v1/channels/:id` | Update a channel |
//! | DELETE | `/api/v1/channels/:id` | Delete a channel |
//! | GET | `/api/v1/channels/:id/bundle-deployments` | Bundle deployments for a channel |
//! | GET | `/api/v1/channels/:id/drift-events` | Drift events for a channel |
//! | GET | `/api/v1/clusters` | List clusters |
//! | GET | `/api/v1/clusters/:id/policy-violations` | Policy violations for a cluster |
//! | GET | `/api/v1/bundle-deployments` | All bundle deployments |
//! | GET | `/api/v1/drift-events` | All drift events |
//! | GET | `/api/v1/policy-violations` | All policy violations |

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch};
use multicompute_provider::DataProvider;
use multicompute_provider::config::DEFAULT_BASE_PATH;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub provider: Arc<dyn DataProvider>,
}

/// Build the API router mounted at `/api/v1`.
pub fn build_router(provider: Arc<dyn DataProvider>) -> Router {
    build_router_at(provider, DEFAULT_BASE_PATH)
}

/// Build the API router mounted at `base_path` (`""` or `/` mounts at the root).
pub fn build_router_at(provider: Arc<dyn DataProvider>, base_path: &str) -> Router {
    let api_routes = Router::new()
        .route(
            "/channels",
            get(handlers::list_channels).post(handlers::create_channel),
        )
        .route(
            "/channels/{id}",
            patch(handlers::update_channel).delete(handlers::delete_channel),
        )
        .route(
            "/channels/{id}/bundle-deployments",
            get(handlers::list_channel_bundle_deployments),
        )
        .route(
            "/channels/{id}/drift-events",
            get(handlers::list_channel_drift_events),
        )
        .route("/clusters", get(handlers::list_clusters))
        .route(
            "/clusters/{id}/policy-violations",
            get(handlers::list_cluster_policy_violations),
        )
        .route("/bundle-deployments", get(handlers::list_bundle_deployments))
        .route("/drift-events", get(handlers::list_drift_events))
        .route("/policy-violations", get(handlers::list_policy_violations))
        .with_state(ApiState { provider });

    let base = base_path.trim().trim_matches('/');
    if base.is_empty() {
        api_routes
    } else {
        Router::new().nest(&format!("/{base}"), api_routes)
    }
}
