//! `WebSocket` push channel for observers.
//!
//! Clients connect to `GET /ws`. The first frame is the snapshot as of the
//! connection instant; after that a frame follows every committed mutation.
//! Each frame is `{ "event": "state", "data": <GameSnapshot> }`.
//!
//! If a client falls behind, lagged snapshots are skipped. The next one it
//! receives is complete, so nothing is lost but intermediate states.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use raid_types::GameSnapshot;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;

/// Name of the push event carrying a snapshot.
pub const STATE_EVENT: &str = "state";

/// A single push frame.
#[derive(Debug, serde::Serialize)]
pub struct PushMessage<'a> {
    /// Event name, always [`STATE_EVENT`].
    pub event: &'static str,
    /// The full snapshot.
    pub data: &'a GameSnapshot,
}

/// Serialize a snapshot as a push frame.
pub fn encode_state(snapshot: &GameSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(&PushMessage {
        event: STATE_EVENT,
        data: snapshot,
    })
}

/// Upgrade an HTTP request to a `WebSocket` observer connection.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_state(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Send the joining snapshot, then forward every broadcast.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let (initial, mut rx) = state.subscribe().await;
    debug!(observers = state.hub().observer_count(), "Observer connected");

    if !send_snapshot(&mut socket, &initial).await {
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(snapshot) => {
                        if !send_snapshot(&mut socket, &snapshot).await {
                            return;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        debug!(skipped = n, "Observer lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!("Broadcast hub closed, shutting down observer");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("Observer disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("Observer disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("Observer socket error: {e}");
                        return;
                    }
                    _ => {
                        // Observers are read-only; ignore anything else.
                    }
                }
            }
        }
    }
}

/// Returns `false` once the socket is unusable.
async fn send_snapshot(socket: &mut WebSocket, snapshot: &GameSnapshot) -> bool {
    let json = match encode_state(snapshot) {
        Ok(j) => j,
        Err(e) => {
            warn!("Failed to serialize state snapshot: {e}");
            return true;
        }
    };
    if socket.send(Message::Text(json.into())).await.is_err() {
        debug!("Observer disconnected (send failed)");
        return false;
    }
    true
}
