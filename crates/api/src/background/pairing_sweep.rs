//! Periodic expiry sweep of pairing codes.
//!
//! Retires sessions whose TTL has passed so abandoned codes do not pile up.
//! Consumption checks the TTL itself, so the sweep only frees memory; it
//! never decides whether a code is still usable.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use kiosk_core::pairing::PairingRegistry;
use tokio_util::sync::CancellationToken;

/// Run the sweep loop every `interval` until `cancel` is triggered.
pub async fn run(registry: Arc<PairingRegistry>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Pairing sweep started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Pairing sweep stopping");
                break;
            }
            _ = ticker.tick() => {
                let expired = registry.sweep_expired(Utc::now()).await;
                if expired > 0 {
                    tracing::info!(expired, "Pairing sweep: retired expired codes");
                } else {
                    tracing::trace!("Pairing sweep: nothing to retire");
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
