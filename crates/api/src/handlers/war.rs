use axum::extract::State;
use axum::Json;
use highcommand_core::kinds::SnapshotKind;
use highcommand_upstream::Target;
use serde_json::Value;

use crate::error::AppResult;
use crate::handlers::fallback;
use crate::response::RefreshResponse;
use crate::state::AppState;

/// GET /api/war/status
pub async fn get_status(State(state): State<AppState>) -> AppResult<Json<Value>> {
    fallback::stored(&state, SnapshotKind::WarStatus, "War status").await
}

/// POST /api/war/status/refresh
pub async fn refresh_status(State(state): State<AppState>) -> AppResult<Json<RefreshResponse>> {
    fallback::refresh(&state, Target::WarStatus, "war status").await
}
