//! JSON frames exchanged with devices.
//!
//! Every frame is `{"event": "<name>", "data": {...}}`; `data` is omitted
//! for events without a payload.

use axum::extract::ws::Message;
use kiosk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// Device -> server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum DeviceMessage {
    /// Ask for a pairing code. Replaces any code this connection holds.
    GenerateCode,
}

/// Server -> device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    /// The code to show on screen.
    ReceiveCode { code: String, expires_at: Timestamp },
    /// An admin consumed this device's code and the display row exists.
    DisplayBound {
        display_id: DbId,
        name: String,
        store_id: String,
        module_id: String,
    },
    /// A frame could not be handled.
    Error { message: String },
}

impl ServerMessage {
    /// Encode as a WebSocket text frame.
    pub fn to_message(&self) -> Message {
        Message::Text(serde_json::to_string(self).unwrap_or_default().into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_code_parses_without_data() {
        let msg: DeviceMessage = serde_json::from_str(r#"{"event":"generateCode"}"#).unwrap();
        assert_eq!(msg, DeviceMessage::GenerateCode);
    }

    #[test]
    fn unknown_event_is_rejected() {
        assert!(serde_json::from_str::<DeviceMessage>(r#"{"event":"reboot"}"#).is_err());
    }

    #[test]
    fn receive_code_uses_camel_case_fields() {
        let msg = ServerMessage::ReceiveCode {
            code: "1A2B3C4D".into(),
            expires_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["event"], "receiveCode");
        assert_eq!(json["data"]["code"], "1A2B3C4D");
        assert!(json["data"]["expiresAt"].is_string());
    }

    #[test]
    fn display_bound_uses_camel_case_fields() {
        let msg = ServerMessage::DisplayBound {
            display_id: 7,
            name: "Lobby TV".into(),
            store_id: "store-1".into(),
            module_id: "kiosk".into(),
        };
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["event"], "displayBound");
        assert_eq!(json["data"]["displayId"], 7);
        assert_eq!(json["data"]["storeId"], "store-1");
    }
}
