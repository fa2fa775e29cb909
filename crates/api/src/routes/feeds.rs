use axum::routing::{get, post};
use axum::Router;

use crate::handlers::feeds;
use crate::state::AppState;

/// Item feed routes, merged at the `/api` root.
///
/// ```text
/// GET  /assignments?limit=
/// POST /assignments/refresh
/// GET  /dispatches?limit=
/// POST /dispatches/refresh
/// GET  /planet-events?planet_index=&limit=
/// POST /planet-events/refresh
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assignments", get(feeds::assignments))
        .route("/assignments/refresh", post(feeds::refresh_assignments))
        .route("/dispatches", get(feeds::dispatches))
        .route("/dispatches/refresh", post(feeds::refresh_dispatches))
        .route("/planet-events", get(feeds::planet_events))
        .route("/planet-events/refresh", post(feeds::refresh_planet_events))
}
