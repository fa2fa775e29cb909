use axum::routing::{get, post};
use axum::Router;

use crate::handlers::statistics;
use crate::state::AppState;

/// Routes mounted at `/statistics`.
///
/// ```text
/// GET  /
/// GET  /history?limit=
/// POST /refresh
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(statistics::get_latest))
        .route("/history", get(statistics::history))
        .route("/refresh", post(statistics::refresh))
}
