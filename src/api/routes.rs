//! Route definitions.

use axum::routing::any;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::skin;
use crate::core::state::AppState;

pub const SKIN_PATH: &str = "/api/skin";

/// Create the application router. Any method reaches the skin handler,
/// which answers non-GET requests itself.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(SKIN_PATH, any(skin::get_skin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
