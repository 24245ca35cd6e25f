//! Realtime gateway for devices awaiting pairing.
//!
//! Provides connection management, the device message protocol, heartbeat
//! monitoring, and the HTTP upgrade handler used by Axum routes.

mod handler;
mod heartbeat;
pub mod manager;
pub mod messages;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use messages::{DeviceMessage, ServerMessage};
