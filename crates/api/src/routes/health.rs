use axum::extract::State;
use axum::{routing::get, Json, Router};
use pinboard_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"healthy"`, or `"degraded"` when the store is unreachable.
    pub status: &'static str,
    /// Time the probe was answered (ISO-8601, UTC).
    pub timestamp: Timestamp,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the todo store answered a ping.
    pub db_healthy: bool,
}

/// GET /health -- returns service and store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match state.todos.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Todo store health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "healthy" } else { "degraded" },
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
