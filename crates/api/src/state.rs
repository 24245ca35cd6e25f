use std::sync::Arc;

use kiosk_core::pairing::PairingRegistry;
use kiosk_db::store::DisplayStore;

use crate::catalog::StoreCatalog;
use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (device connections).
    pub ws_manager: Arc<WsManager>,
    /// In-flight pairing codes.
    pub pairing: Arc<PairingRegistry>,
    /// Durable registry of bound displays.
    pub displays: Arc<dyn DisplayStore>,
    /// Store/module lookup consulted before a code is consumed.
    pub store_catalog: Arc<dyn StoreCatalog>,
}
