//! Route definitions for bound displays.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::displays;
use crate::state::AppState;

/// Routes mounted at `/displays`.
///
/// ```text
/// GET    /              -> list_displays
/// POST   /              -> bind_display
/// GET    /{id}          -> get_display
/// DELETE /{id}          -> delete_display
/// PUT    /{id}/status   -> update_display_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(displays::list_displays).post(displays::bind_display),
        )
        .route(
            "/{id}",
            get(displays::get_display).delete(displays::delete_display),
        )
        .route("/{id}/status", put(displays::update_display_status))
}
