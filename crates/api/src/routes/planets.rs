use axum::routing::get;
use axum::Router;

use crate::handlers::planets;
use crate::state::AppState;

/// Routes mounted at `/planets`.
///
/// ```text
/// GET /
/// GET /{index}
/// GET /{index}/history?limit=
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(planets::list))
        .route("/{index}", get(planets::get_status))
        .route("/{index}/history", get(planets::history))
}
