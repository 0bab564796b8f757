//! Presence tracking
//!
//! Counts live connections and pushes the count to every connected player
//! whenever it changes.

use crate::core::message::ServerMessage;
use crate::core::registry::PlayerRegistry;

/// Process-wide count of connected players
pub struct PresenceTracker {
    count: usize,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Record a connect, returning the new count
    pub fn connected(&mut self) -> usize {
        self.count += 1;
        self.count
    }

    /// Record a disconnect, returning the new count; never goes negative
    pub fn disconnected(&mut self) -> usize {
        self.count = self.count.saturating_sub(1);
        self.count
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Push the current count to every registered player
    pub fn broadcast_count(&self, registry: &PlayerRegistry) -> usize {
        registry.broadcast(&ServerMessage::TotalPlayersCountChange { count: self.count })
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new()
    }
}
