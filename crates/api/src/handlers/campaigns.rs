use axum::extract::State;
use axum::Json;
use chrono::Utc;
use highcommand_core::campaigns::is_active;
use highcommand_core::kinds::SnapshotKind;
use highcommand_upstream::Target;
use serde_json::Value;

use crate::error::AppResult;
use crate::handlers::fallback;
use crate::state::AppState;

/// Upper bound on campaign rows scanned for the active listing.
const MAX_STORED_CAMPAIGNS: i64 = 1000;

/// GET /api/campaigns
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Value>> {
    fallback::live_or_cached(&state, Target::Campaigns, SnapshotKind::Campaigns).await
}

/// GET /api/campaigns/active
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let now = Utc::now();
    let active: Vec<Value> = state
        .store
        .latest(SnapshotKind::Campaign, MAX_STORED_CAMPAIGNS)
        .await
        .into_iter()
        .filter(|campaign| is_active(campaign, now))
        .collect();
    fallback::non_empty(active, "Active campaigns")
}
