//! WebSocket connection management
//! Handles the state of a single connected player

use std::time::{Duration, Instant};

use log::warn;
use tokio::sync::mpsc;
use uuid::Uuid;
use warp::ws::Message;

use crate::core::message::{ServerMessage, Side};

/// Server-side representative of one connected player
pub struct Connection {
    pub id: String,
    pub sender: mpsc::UnboundedSender<Message>,
    pub connected_at: Instant,
    /// Id of the player this one is currently paired with
    pub opponent_id: Option<String>,
    /// Side assigned at pairing time, cleared when the session ends
    pub side: Option<Side>,
    /// Most recent non-throttled match request, for rate limiting
    pub last_match_request: Option<Instant>,
}

impl Connection {
    /// Create a new connection with a unique ID
    pub fn new(sender: mpsc::UnboundedSender<Message>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), sender)
    }

    /// Create a connection with a caller-supplied ID
    pub fn with_id(id: String, sender: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            id,
            sender,
            connected_at: Instant::now(),
            opponent_id: None,
            side: None,
            last_match_request: None,
        }
    }

    /// Send a text frame through this connection.
    ///
    /// Sends are fire-and-forget: a failure means the receiving end is gone
    /// and disconnect cleanup will run shortly.
    pub fn send_text(&self, text: &str) -> bool {
        match self.sender.send(Message::text(text)) {
            Ok(_) => true,
            Err(_) => {
                warn!("Failed to send message to player {}", self.id);
                false
            }
        }
    }

    /// Serialize and send a server message through this connection
    pub fn send_message(&self, message: &ServerMessage) -> bool {
        match serde_json::to_string(message) {
            Ok(text) => self.send_text(&text),
            Err(e) => {
                warn!("Failed to serialize message for player {}: {}", self.id, e);
                false
            }
        }
    }

    /// Whether this player is currently paired in a session
    pub fn in_session(&self) -> bool {
        self.opponent_id.is_some()
    }

    /// Clear the pairing fields at session end
    pub fn clear_session(&mut self) {
        self.opponent_id = None;
        self.side = None;
    }

    /// Calculate the connection duration
    pub fn connection_duration(&self) -> Duration {
        self.connected_at.elapsed()
    }
}
