//! Slow-changing reference data: factions and biomes.

use axum::extract::State;
use axum::Json;
use highcommand_core::kinds::SnapshotKind;
use highcommand_upstream::Target;
use serde_json::Value;

use crate::error::AppResult;
use crate::handlers::fallback;
use crate::state::AppState;

/// GET /api/factions
pub async fn factions(State(state): State<AppState>) -> AppResult<Json<Value>> {
    fallback::live_or_cached(&state, Target::Factions, SnapshotKind::Factions).await
}

/// GET /api/biomes
pub async fn biomes(State(state): State<AppState>) -> AppResult<Json<Value>> {
    fallback::live_or_cached(&state, Target::Biomes, SnapshotKind::Biomes).await
}
