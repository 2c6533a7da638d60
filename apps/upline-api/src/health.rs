//! Health and readiness probes.

use std::sync::atomic::Ordering;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Basic identity endpoint.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "upline-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Kubernetes liveness probe.
pub async fn livez_handler() -> StatusCode {
    StatusCode::OK
}

/// Kubernetes readiness probe.
///
/// Verifies the database answers within the configured timeout and returns
/// 503 while shutting down so traffic drains first.
pub async fn readyz_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.shutting_down.load(Ordering::Acquire) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "shutting_down" })),
        );
    }

    let ping = sqlx::query("SELECT 1").execute(&state.pool);
    match tokio::time::timeout(Duration::from_secs(state.db_timeout_secs), ping).await {
        Ok(Ok(_)) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness probe database check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "component": "database" })),
            )
        }
        Err(_) => {
            tracing::warn!(
                timeout_secs = state.db_timeout_secs,
                "Readiness probe database check timed out"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "component": "database" })),
            )
        }
    }
}
