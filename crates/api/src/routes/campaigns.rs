use axum::routing::get;
use axum::Router;

use crate::handlers::campaigns;
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET /
/// GET /active
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(campaigns::list))
        .route("/active", get(campaigns::list_active))
}
