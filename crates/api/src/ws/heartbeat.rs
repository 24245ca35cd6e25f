use std::sync::Arc;
use std::time::Duration;

use crate::ws::manager::WsManager;

/// Interval between pings to connected devices.
const PING_EVERY: Duration = Duration::from_secs(30);

/// Ping every connected device on a fixed schedule. `main` aborts the
/// returned handle on shutdown.
pub fn start_heartbeat(devices: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PING_EVERY);
        loop {
            ticker.tick().await;
            let connected = devices.connection_count().await;
            tracing::trace!(devices = connected, "Pinging devices");
            devices.ping_all().await;
        }
    })
}
