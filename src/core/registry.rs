//! Connection registry
//!
//! Single source of truth for which players are live. Opponent handles are
//! always resolved here at forwarding time, never cached across calls.

use std::collections::HashMap;

use crate::core::connection::Connection;
use crate::core::message::ServerMessage;

/// Maps player ids to their live connections
pub struct PlayerRegistry {
    connections: HashMap<String, Connection>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    /// Store a new connection, returning its id
    pub fn register(&mut self, connection: Connection) -> String {
        let id = connection.id.clone();
        self.connections.insert(id.clone(), connection);
        id
    }

    pub fn lookup(&self, id: &str) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub fn lookup_mut(&mut self, id: &str) -> Option<&mut Connection> {
        self.connections.get_mut(id)
    }

    /// Remove a connection, returning it so callers can inspect its session
    /// state. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Connection> {
        self.connections.remove(id)
    }

    pub fn player_count(&self) -> usize {
        self.connections.len()
    }

    /// Send a message to a single player, if still registered
    pub fn send_to(&self, id: &str, message: &ServerMessage) -> bool {
        match self.connections.get(id) {
            Some(connection) => connection.send_message(message),
            None => false,
        }
    }

    /// Send a message to every registered player, returning the number of
    /// successful sends
    pub fn broadcast(&self, message: &ServerMessage) -> usize {
        let text = match serde_json::to_string(message) {
            Ok(text) => text,
            Err(_) => return 0,
        };

        let mut success_count = 0;
        for connection in self.connections.values() {
            if connection.send_text(&text) {
                success_count += 1;
            }
        }
        success_count
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
