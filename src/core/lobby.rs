//! Lobby: the process-global state behind a single lock
//!
//! Composes the registry, the matchmaker and the presence tracker. Every
//! inbound event takes the lock and runs to completion, which reproduces
//! the atomicity of a single-threaded event loop; outbound sends go through
//! per-connection channels and never block the lock holder.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::info;
use tokio::sync::mpsc;
use warp::ws::Message as WsMessage;

use crate::core::connection::Connection;
use crate::core::matchmaker::Matchmaker;
use crate::core::message::{GameOutcome, ServerMessage};
use crate::core::presence::PresenceTracker;
use crate::core::queue::TimeBudget;
use crate::core::registry::PlayerRegistry;
use crate::core::relay;
use crate::error::Result;

pub struct Lobby {
    registry: PlayerRegistry,
    matchmaker: Matchmaker,
    presence: PresenceTracker,
}

impl Lobby {
    pub fn new(match_interval: Duration) -> Self {
        Self {
            registry: PlayerRegistry::new(),
            matchmaker: Matchmaker::new(match_interval),
            presence: PresenceTracker::new(),
        }
    }

    /// Register a new player connection and broadcast the updated count
    pub fn register_player(&mut self, sender: mpsc::UnboundedSender<WsMessage>) -> String {
        let id = self.registry.register(Connection::new(sender));
        self.presence.connected();
        self.presence.broadcast_count(&self.registry);
        info!("Player connected: {}", id);
        info!("Current connections: {}", self.presence.count());
        id
    }

    /// Full disconnect flow: remove from the registry, resolve any active
    /// session, drop from the waiting queues, broadcast the updated count.
    /// Idempotent; unknown ids are a no-op.
    pub fn disconnect_player(&mut self, id: &str) {
        let departed = match self.registry.remove(id) {
            Some(departed) => departed,
            None => return,
        };

        relay::resolve_disconnect_outcome(
            &mut self.registry,
            id,
            departed.opponent_id.as_deref(),
        );
        self.matchmaker.cancel(id);

        self.presence.disconnected();
        self.presence.broadcast_count(&self.registry);
        info!(
            "Player disconnected: {} (connected for {:?})",
            id,
            departed.connection_duration()
        );
        info!("Current connections: {}", self.presence.count());
    }

    /// Resolve a `want_to_play` request, establishing a session when an
    /// opponent is already waiting
    pub fn request_match(&mut self, id: &str, budget: TimeBudget) {
        if let Some(pairing) = self.matchmaker.request_match(&mut self.registry, id, budget) {
            relay::establish(&mut self.registry, &pairing);
        }
    }

    pub fn cancel_matchmaking(&mut self, id: &str) {
        self.matchmaker.cancel(id);
    }

    /// Unicast the current presence count to one player
    pub fn send_player_count_to(&self, id: &str) -> bool {
        self.registry.send_to(
            id,
            &ServerMessage::TotalPlayersCountChange {
                count: self.presence.count(),
            },
        )
    }

    pub fn relay_state(&self, from: &str, fen: &str, turn: &str) -> bool {
        relay::relay_state_update(&self.registry, from, fen, turn)
    }

    pub fn relay_outcome(&mut self, from: &str, outcome: GameOutcome) -> bool {
        relay::relay_outcome(&mut self.registry, from, outcome)
    }

    pub fn player_count(&self) -> usize {
        self.presence.count()
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn matchmaker(&self) -> &Matchmaker {
        &self.matchmaker
    }
}

// Thread-safe lobby wrapper
pub type SharedLobby = Arc<Mutex<Lobby>>;

// Create a new thread-safe lobby
pub fn create_lobby(match_interval: Duration) -> SharedLobby {
    Arc::new(Mutex::new(Lobby::new(match_interval)))
}

/// Acquire the lobby lock, surfacing poisoning as a crate error
pub fn lock_lobby(lobby: &SharedLobby) -> Result<MutexGuard<'_, Lobby>> {
    lobby.lock().map_err(Into::into)
}
