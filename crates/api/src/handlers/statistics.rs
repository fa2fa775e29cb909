use axum::extract::State;
use axum::Json;
use highcommand_core::kinds::SnapshotKind;
use highcommand_upstream::Target;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::ApiQuery;
use crate::handlers::fallback;
use crate::query::{LimitParams, STATISTICS_HISTORY_LIMIT};
use crate::response::RefreshResponse;
use crate::state::AppState;

/// GET /api/statistics
pub async fn get_latest(State(state): State<AppState>) -> AppResult<Json<Value>> {
    fallback::stored(&state, SnapshotKind::Statistics, "Statistics").await
}

/// GET /api/statistics/history?limit=
pub async fn history(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> AppResult<Json<Value>> {
    let limit = STATISTICS_HISTORY_LIMIT.resolve(params.limit)?;
    let docs = state.store.latest(SnapshotKind::Statistics, limit).await;
    fallback::non_empty(docs, "Statistics history")
}

/// POST /api/statistics/refresh
pub async fn refresh(State(state): State<AppState>) -> AppResult<Json<RefreshResponse>> {
    fallback::refresh(&state, Target::Statistics, "statistics").await
}
