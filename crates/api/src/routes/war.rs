use axum::routing::{get, post};
use axum::Router;

use crate::handlers::war;
use crate::state::AppState;

/// Routes mounted at `/war`.
///
/// ```text
/// GET  /status
/// POST /status/refresh
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(war::get_status))
        .route("/status/refresh", post(war::refresh_status))
}
