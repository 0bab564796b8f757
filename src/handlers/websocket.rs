use futures_util::sink::SinkExt;
use futures_util::stream::StreamExt;
use log::{debug, error, warn};
use tokio::sync::mpsc;
use warp::ws::{Message, WebSocket};

use crate::constants::SERVER_VERSION;
use crate::core::lobby::{lock_lobby, SharedLobby};
use crate::core::message::{ClientMessage, ServerMessage};

// Handle a WebSocket connection for its whole lifetime
pub async fn handle_ws_client(ws: WebSocket, lobby: SharedLobby) {
    let (mut ws_tx, mut ws_rx) = ws.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // Spawn a task to forward messages from our channel to the WebSocket
    tokio::task::spawn(async move {
        let mut rx = rx;
        while let Some(message) = rx.recv().await {
            if let Err(e) = ws_tx.send(message).await {
                debug!("Failed to send WebSocket message: {}", e);
                break;
            }
        }
    });

    // Register the player; this also broadcasts the new presence count
    let player_id = {
        match lock_lobby(&lobby) {
            Ok(mut lobby_guard) => lobby_guard.register_player(tx.clone()),
            Err(e) => {
                error!("Failed to acquire lobby lock for registration: {}", e);
                return;
            }
        }
    };

    // Greet the client with the server version for staleness detection
    let version_msg = ServerMessage::ServerVersion {
        version: SERVER_VERSION.to_string(),
    };
    match serde_json::to_string(&version_msg) {
        Ok(text) => {
            if tx.send(Message::text(text)).is_err() {
                warn!("Failed to send version greeting to {}", player_id);
            }
        }
        Err(e) => {
            error!("Failed to serialize version message: {}", e);
        }
    }

    // Handle incoming messages
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(msg) => {
                // Only process text frames; pings are answered by warp
                if msg.is_text() {
                    process_message(msg, &player_id, &lobby);
                }
            }
            Err(e) => {
                warn!("WebSocket error for {}: {}", player_id, e);
                break;
            }
        }
    }

    // Client disconnected: remove, resolve any active session, leave queues
    match lock_lobby(&lobby) {
        Ok(mut lobby_guard) => lobby_guard.disconnect_player(&player_id),
        Err(e) => {
            error!("Failed to acquire lobby lock for disconnection: {}", e);
        }
    }
}

// Process a single inbound frame; anything malformed is dropped silently
fn process_message(msg: Message, player_id: &str, lobby: &SharedLobby) {
    let text = match msg.to_str() {
        Ok(text) => text,
        Err(_) => return,
    };

    let parsed = match serde_json::from_str::<ClientMessage>(text) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Dropping malformed message from {}: {}", player_id, e);
            return;
        }
    };

    let mut lobby_guard = match lock_lobby(lobby) {
        Ok(guard) => guard,
        Err(e) => {
            error!("Failed to acquire lobby lock for message processing: {}", e);
            return;
        }
    };

    match parsed {
        ClientMessage::WantToPlay { time_budget } => {
            lobby_guard.request_match(player_id, time_budget);
        }
        ClientMessage::CancelMatchmaking => {
            lobby_guard.cancel_matchmaking(player_id);
        }
        ClientMessage::GetPlayerCount => {
            lobby_guard.send_player_count_to(player_id);
        }
        ClientMessage::SyncState { fen, turn } => {
            lobby_guard.relay_state(player_id, &fen, &turn);
        }
        ClientMessage::GameOver { outcome } => {
            lobby_guard.relay_outcome(player_id, outcome);
        }
    }
}
