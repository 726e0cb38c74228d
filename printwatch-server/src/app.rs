use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handles::{StatusState, get_status, home_page, not_found};
use crate::services::SharedStatus;

/// Builds the read-only HTTP surface over the shared status record. Unknown
/// paths get 404; non-GET methods on the known routes get 405 from the
/// method router.
pub fn create_app(status: SharedStatus) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/status", get(get_status))
        .with_state(StatusState { status })
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
