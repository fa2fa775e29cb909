use axum::routing::get;
use axum::Router;

use crate::handlers::reference;
use crate::state::AppState;

/// Reference data routes, merged at the `/api` root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/factions", get(reference::factions))
        .route("/biomes", get(reference::biomes))
}
