//! Health check and request accounting

use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime: u64,
    users_processed: u64,
    errors_encountered: u64,
    store: &'static str,
}

/// Always answers 200; a failing store only degrades the status
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_ok = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check: store unavailable: {}", e);
            false
        }
    };
    let snapshot = state.metrics.snapshot();

    Json(HealthResponse {
        status: if store_ok { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime: snapshot.uptime_secs,
        users_processed: snapshot.requests,
        errors_encountered: snapshot.errors,
        store: if store_ok { "ok" } else { "unavailable" },
    })
}

/// Middleware counting finished requests and error responses
pub async fn track_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();
    state
        .metrics
        .record(status.is_client_error() || status.is_server_error());
    response
}
