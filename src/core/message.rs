//! Wire protocol for the matchmaking server
//!
//! Every frame is a JSON object tagged by `type`; the tag names are the
//! protocol contract with the board UI and must not change.

use serde::{Deserialize, Serialize};

use crate::core::queue::TimeBudget;

/// Side assigned to a player when a match is made.
///
/// The waiting (longest-queued) player always receives White.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Side {
    /// The full color name clients use in outcome payloads
    pub fn name(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

/// Terminal event for a session, either reported by a client
/// (checkmate, resignation, ...) or synthesized on disconnect.
///
/// `winner` carries whatever the reporting client sent ("White",
/// "Black", or null for a draw) and is forwarded verbatim; the server
/// only fills it in itself on disconnect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub reason: String,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Messages a client may send to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    WantToPlay { time_budget: TimeBudget },
    CancelMatchmaking,
    GetPlayerCount,
    SyncState { fen: String, turn: String },
    GameOver { outcome: GameOutcome },
}

/// Messages the server may push to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    TotalPlayersCountChange { count: usize },
    MatchMade { side: Side, time_budget: TimeBudget },
    SyncStateFromServer { fen: String, turn: String },
    GameOverFromServer { outcome: GameOutcome },
    ServerVersion { version: String },
}
