//! REST API handlers.
//!
//! Each handler forwards to the `DataProvider` and returns the records as
//! bare JSON, the shape the live provider decodes.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, warn};

use multicompute_model::{ChannelPatch, NewChannel};
use multicompute_provider::{ProviderError, ProviderResult};

use crate::ApiState;

/// Error body for every non-2xx response.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(err: &ProviderError) -> Response {
    let status = match err {
        ProviderError::NotFound(_) | ProviderError::RequestFailed { status: 404 } => {
            StatusCode::NOT_FOUND
        }
        ProviderError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ProviderError::RequestFailed { .. } | ProviderError::Transport(_) => StatusCode::BAD_GATEWAY,
        ProviderError::Encode(_) | ProviderError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        warn!(error = %err, %status, "provider call failed");
    }
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// 200 with the JSON body, or the mapped error.
fn json_or_error<T: Serialize>(result: ProviderResult<T>) -> Response {
    match result {
        Ok(body) => Json(body).into_response(),
        Err(e) => error_response(&e),
    }
}

// ── Channels ───────────────────────────────────────────────────

/// GET /channels
pub async fn list_channels(State(state): State<ApiState>) -> impl IntoResponse {
    json_or_error(state.provider.get_channels().await)
}

/// POST /channels
pub async fn create_channel(
    State(state): State<ApiState>,
    Json(draft): Json<NewChannel>,
) -> impl IntoResponse {
    match state.provider.create_channel(draft).await {
        Ok(channel) => {
            debug!(id = %channel.id, "channel created via API");
            (StatusCode::CREATED, Json(channel)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// PATCH /channels/:id
pub async fn update_channel(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(patch): Json<ChannelPatch>,
) -> impl IntoResponse {
    json_or_error(state.provider.update_channel(&id, patch).await)
}

/// DELETE /channels/:id
pub async fn delete_channel(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.provider.delete_channel(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /channels/:id/bundle-deployments
pub async fn list_channel_bundle_deployments(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    json_or_error(state.provider.get_bundle_deployments(Some(&id)).await)
}

/// GET /channels/:id/drift-events
pub async fn list_channel_drift_events(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    json_or_error(state.provider.get_drift_events(Some(&id)).await)
}

// ── Clusters ───────────────────────────────────────────────────

/// GET /clusters
pub async fn list_clusters(State(state): State<ApiState>) -> impl IntoResponse {
    json_or_error(state.provider.get_clusters().await)
}

/// GET /clusters/:id/policy-violations
pub async fn list_cluster_policy_violations(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    json_or_error(state.provider.get_policy_violations(Some(&id)).await)
}

// ── Flat collections ───────────────────────────────────────────

/// GET /bundle-deployments
pub async fn list_bundle_deployments(State(state): State<ApiState>) -> impl IntoResponse {
    json_or_error(state.provider.get_bundle_deployments(None).await)
}

/// GET /drift-events
pub async fn list_drift_events(State(state): State<ApiState>) -> impl IntoResponse {
    json_or_error(state.provider.get_drift_events(None).await)
}

/// GET /policy-violations
pub async fn list_policy_violations(State(state): State<ApiState>) -> impl IntoResponse {
    json_or_error(state.provider.get_policy_violations(None).await)
}
