use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Pairing codes currently held by the registry.
    pub active_pairing_sessions: usize,
    /// Open device WebSocket connections.
    pub ws_connections: usize,
    /// Configured lifetime of a pairing code.
    pub pairing_code_ttl_secs: i64,
}

/// GET /health -- returns service, database and pairing health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = state.displays.health_check().await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        active_pairing_sessions: state.pairing.active_count().await,
        ws_connections: state.ws_manager.connection_count().await,
        pairing_code_ttl_secs: state.config.pairing_code_ttl_secs,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
