use axum::extract::State;
use axum::Json;
use highcommand_core::error::CoreError;
use highcommand_core::kinds::SnapshotKind;
use highcommand_upstream::Target;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::handlers::fallback;
use crate::query::{LimitParams, PLANET_HISTORY_LIMIT};
use crate::state::AppState;

/// GET /api/planets
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Value>> {
    fallback::live_or_cached(&state, Target::Planets, SnapshotKind::Planets).await
}

/// GET /api/planets/{index}
pub async fn get_status(
    State(state): State<AppState>,
    ApiPath(index): ApiPath<i64>,
) -> AppResult<Json<Value>> {
    ensure_index(index)?;
    fallback::live_or_cached_planet(&state, index).await
}

/// GET /api/planets/{index}/history?limit=
pub async fn history(
    State(state): State<AppState>,
    ApiPath(index): ApiPath<i64>,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> AppResult<Json<Value>> {
    ensure_index(index)?;
    let limit = PLANET_HISTORY_LIMIT.resolve(params.limit)?;
    let docs = state
        .store
        .history_by_key(SnapshotKind::PlanetStatus, index, limit)
        .await;
    fallback::non_empty(docs, &format!("History for planet {index}"))
}

fn ensure_index(index: i64) -> Result<(), CoreError> {
    if index < 0 {
        return Err(CoreError::Validation(format!(
            "planet index must be non-negative, got {index}"
        )));
    }
    Ok(())
}
