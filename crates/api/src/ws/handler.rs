use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::state::AppState;
use crate::ws::messages::{DeviceMessage, ServerMessage};

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection is registered with `WsManager` and
/// managed by two tasks (sender + receiver).
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Manage a single device connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes inbound frames on the current task, one at a time, so a
///      device's requests are answered in order.
///   4. Retires the device's pairing code and cleans up on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "Device connected");

    let mut rx = state.ws_manager.add(conn_id.clone()).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound frames.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => handle_text(&state, &conn_id, text.as_str()).await,
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(conn_id = %conn_id, error = %e, "Device connection lost");
                break;
            }
        }
    }

    // Clean up: retire the pairing code, remove the connection, stop the sender.
    if let Some(session) = state.pairing.on_disconnect(&conn_id).await {
        tracing::debug!(conn_id = %conn_id, code = %session.code, "Pairing code retired on disconnect");
    }
    let connected_for = state
        .ws_manager
        .connected_at(&conn_id)
        .await
        .map(|at| (chrono::Utc::now() - at).num_seconds());
    state.ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, connected_secs = ?connected_for, "Device disconnected");
}

/// Dispatch one text frame from a device.
async fn handle_text(state: &AppState, conn_id: &str, text: &str) {
    let reply = match serde_json::from_str::<DeviceMessage>(text) {
        Ok(DeviceMessage::GenerateCode) => match state.pairing.request_code(conn_id).await {
            Ok(session) => {
                tracing::info!(conn_id = %conn_id, expires_at = %session.expires_at, "Pairing code issued");
                ServerMessage::ReceiveCode {
                    code: session.code,
                    expires_at: session.expires_at,
                }
            }
            Err(e) => {
                tracing::warn!(conn_id = %conn_id, error = %e, "Pairing code request refused");
                ServerMessage::Error {
                    message: e.to_string(),
                }
            }
        },
        Err(e) => {
            tracing::debug!(conn_id = %conn_id, error = %e, "Unrecognized device frame");
            ServerMessage::Error {
                message: format!("Unrecognized message: {e}"),
            }
        }
    };

    if !state.ws_manager.send_to(conn_id, reply.to_message()).await {
        tracing::debug!(conn_id = %conn_id, "Reply dropped, connection already gone");
    }
}
