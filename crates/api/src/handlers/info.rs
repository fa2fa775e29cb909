//! Service information and health.

use axum::extract::State;
use axum::Json;
use highcommand_core::status_keys::UPSTREAM_API_AVAILABLE;

use crate::response::{HealthResponse, ServiceInfo};
use crate::state::AppState;

/// GET /
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "High Command API",
        version: env!("CARGO_PKG_VERSION"),
        description: "Cached, rate-limited mirror of the Helldivers 2 war API",
    })
}

/// GET /api/health
///
/// Reads the upstream flag recorded by the last collection cycle; never
/// calls upstream itself.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = state.store.is_healthy().await;
    let upstream_online = state
        .store
        .get_flag(UPSTREAM_API_AVAILABLE)
        .await
        .unwrap_or(false);

    Json(HealthResponse {
        status: if db_healthy { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        collector_running: state.collector.is_running().await,
        upstream_api: if upstream_online { "online" } else { "offline" },
        db_healthy,
    })
}
