//! Domain logic shared by the kiosk pairing service.
//!
//! Holds the pairing code generator, the in-memory pairing session registry
//! and the validation rules for bound displays. Nothing in here touches the
//! database or the network.

pub mod display;
pub mod error;
pub mod pairing;
pub mod types;
