use axum::routing::get;
use axum::Router;

use crate::handlers::info;
use crate::state::AppState;

/// Mount the service info and health routes (root level, not nested).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(info::root))
        .route("/api/health", get(info::health))
}
