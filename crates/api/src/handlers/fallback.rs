//! Live-first reads with a cache fallback.
//!
//! Order of preference: a live upstream fetch (written through to the
//! store), then the newest stored snapshot, then 503. A live result is
//! never mixed with cached data. The live attempt gets
//! [`AppState::live_fetch_timeout`]; past that the cache answers.

use std::fmt;
use std::future::Future;

use axum::Json;
use highcommand_core::error::CoreError;
use highcommand_core::kinds::SnapshotKind;
use highcommand_upstream::{Target, UpstreamError};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::RefreshResponse;
use crate::state::AppState;

/// Serve `target` live, else the newest `kind` snapshot, else 503.
pub async fn live_or_cached(
    state: &AppState,
    target: Target,
    kind: SnapshotKind,
) -> AppResult<Json<Value>> {
    match live(state, state.collector.refresh(target)).await {
        Ok(data) => Ok(Json(data)),
        Err(e) => {
            log_fallback(target, &e);
            state
                .store
                .latest_snapshot(kind)
                .await
                .map(Json)
                .ok_or_else(|| unavailable(target))
        }
    }
}

/// Serve one planet live, else its newest stored status, else 503.
pub async fn live_or_cached_planet(state: &AppState, index: i64) -> AppResult<Json<Value>> {
    match live(state, state.collector.collect_planet(index)).await {
        Ok(data) => Ok(Json(data)),
        Err(e) => {
            let target = Target::Planet(index);
            log_fallback(target, &e);
            state
                .store
                .latest_by_key(SnapshotKind::PlanetStatus, index)
                .await
                .map(Json)
                .ok_or_else(|| unavailable(target))
        }
    }
}

/// Serve the newest stored snapshot of `kind`, or 404.
pub async fn stored(state: &AppState, kind: SnapshotKind, what: &str) -> AppResult<Json<Value>> {
    state
        .store
        .latest_snapshot(kind)
        .await
        .map(Json)
        .ok_or_else(|| CoreError::NotFound(what.to_string()).into())
}

/// Fetch `target` now, store it and wrap it in a [`RefreshResponse`].
pub async fn refresh(
    state: &AppState,
    target: Target,
    what: &str,
) -> AppResult<Json<RefreshResponse>> {
    state
        .collector
        .refresh(target)
        .await
        .map(|data| Json(RefreshResponse::ok(data)))
        .map_err(|e| AppError::RefreshFailed(format!("Failed to refresh {what}: {e}")))
}

/// Wrap a stored listing, turning an empty result into 404.
pub fn non_empty(docs: Vec<Value>, what: &str) -> AppResult<Json<Value>> {
    if docs.is_empty() {
        return Err(CoreError::NotFound(what.to_string()).into());
    }
    Ok(Json(Value::Array(docs)))
}

// ---- private helpers ----

/// Why the live attempt produced nothing.
enum LiveFailure {
    Upstream(UpstreamError),
    Deadline(std::time::Duration),
}

impl fmt::Display for LiveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiveFailure::Upstream(e) => fmt::Display::fmt(e, f),
            LiveFailure::Deadline(after) => write!(f, "no answer within {after:?}"),
        }
    }
}

/// Run a live fetch under the state's deadline. On expiry the fetch is
/// dropped, including any pending backoff.
async fn live(
    state: &AppState,
    fetch: impl Future<Output = Result<Value, UpstreamError>>,
) -> Result<Value, LiveFailure> {
    match tokio::time::timeout(state.live_fetch_timeout, fetch).await {
        Ok(result) => result.map_err(LiveFailure::Upstream),
        Err(_) => Err(LiveFailure::Deadline(state.live_fetch_timeout)),
    }
}

fn log_fallback(target: Target, error: &LiveFailure) {
    tracing::info!(
        resource = target.name(),
        error = %error,
        "Live fetch failed, falling back to cache",
    );
}

fn unavailable(target: Target) -> AppError {
    AppError::Unavailable(format!(
        "{} is unavailable upstream and not cached",
        target.name()
    ))
}
