//! Keyed item feeds: assignments, dispatches and planet events.
//!
//! Items are stored one row per upstream id and read back newest first.

use axum::extract::State;
use axum::Json;
use highcommand_core::kinds::SnapshotKind;
use highcommand_upstream::Target;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::ApiQuery;
use crate::handlers::fallback;
use crate::query::{LimitParams, PlanetEventParams, FEED_LIMIT};
use crate::response::RefreshResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

/// GET /api/assignments?limit=
pub async fn assignments(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> AppResult<Json<Value>> {
    let limit = FEED_LIMIT.resolve(params.limit)?;
    let docs = state.store.latest(SnapshotKind::Assignment, limit).await;
    fallback::non_empty(docs, "Assignments")
}

/// POST /api/assignments/refresh
pub async fn refresh_assignments(
    State(state): State<AppState>,
) -> AppResult<Json<RefreshResponse>> {
    fallback::refresh(&state, Target::Assignments, "assignments").await
}

// ---------------------------------------------------------------------------
// Dispatches
// ---------------------------------------------------------------------------

/// GET /api/dispatches?limit=
pub async fn dispatches(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> AppResult<Json<Value>> {
    let limit = FEED_LIMIT.resolve(params.limit)?;
    let docs = state.store.latest(SnapshotKind::Dispatch, limit).await;
    fallback::non_empty(docs, "Dispatches")
}

/// POST /api/dispatches/refresh
pub async fn refresh_dispatches(
    State(state): State<AppState>,
) -> AppResult<Json<RefreshResponse>> {
    fallback::refresh(&state, Target::Dispatches, "dispatches").await
}

// ---------------------------------------------------------------------------
// Planet events
// ---------------------------------------------------------------------------

/// GET /api/planet-events?planet_index=&limit=
pub async fn planet_events(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PlanetEventParams>,
) -> AppResult<Json<Value>> {
    let limit = FEED_LIMIT.resolve(params.limit)?;
    let docs = match params.planet_index {
        Some(index) => {
            state
                .store
                .history_by_key(SnapshotKind::PlanetEvent, index, limit)
                .await
        }
        None => state.store.latest(SnapshotKind::PlanetEvent, limit).await,
    };
    fallback::non_empty(docs, "Planet events")
}

/// POST /api/planet-events/refresh
pub async fn refresh_planet_events(
    State(state): State<AppState>,
) -> AppResult<Json<RefreshResponse>> {
    fallback::refresh(&state, Target::PlanetEvents, "planet events").await
}
