pub mod displays;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                        device WebSocket (pairing codes)
///
/// /displays                  list, bind (POST)
/// /displays/{id}             get, delete
/// /displays/{id}/status      status report (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/displays", displays::router())
}
