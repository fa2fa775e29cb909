pub mod campaigns;
pub mod feeds;
pub mod health;
pub mod planets;
pub mod reference;
pub mod statistics;
pub mod war;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /war/status                        latest war status (GET)
/// /war/status/refresh                fetch now (POST)
///
/// /campaigns                         live, cache fallback (GET)
/// /campaigns/active                  stored, not expired (GET)
///
/// /planets                           live, cache fallback (GET)
/// /planets/{index}                   live, cache fallback by planet (GET)
/// /planets/{index}/history           stored history (GET)
///
/// /statistics                        latest statistics (GET)
/// /statistics/history                stored history (GET)
/// /statistics/refresh                fetch now (POST)
///
/// /factions                          live, cache fallback (GET)
/// /biomes                            live, cache fallback (GET)
///
/// /assignments                       stored, newest first (GET)
/// /assignments/refresh               fetch now (POST)
/// /dispatches                        stored, newest first (GET)
/// /dispatches/refresh                fetch now (POST)
/// /planet-events                     stored, optional planet filter (GET)
/// /planet-events/refresh             fetch now (POST)
/// ```
///
/// `/api/health` is mounted separately by [`health::router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/war", war::router())
        .nest("/campaigns", campaigns::router())
        .nest("/planets", planets::router())
        .nest("/statistics", statistics::router())
        .merge(reference::router())
        .merge(feeds::router())
}
