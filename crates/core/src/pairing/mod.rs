//! Device pairing: short-lived codes a device shows on screen and an admin
//! types into the dashboard to bind that device to a store.

pub mod code;
pub mod registry;

pub use code::normalize_code;
pub use registry::{PairingConfig, PairingError, PairingRegistry, PairingSession, SessionState};
