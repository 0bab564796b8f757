//! Core functionality for the matchmaking server

pub mod connection;
pub mod lobby;
pub mod matchmaker;
pub mod message;
pub mod presence;
pub mod queue;
pub mod registry;
pub mod relay;

// Re-export main components for convenience
pub use connection::Connection;
pub use lobby::{create_lobby, lock_lobby, Lobby, SharedLobby};
pub use matchmaker::{Matchmaker, Pairing};
pub use message::{ClientMessage, GameOutcome, ServerMessage, Side};
pub use presence::PresenceTracker;
pub use queue::{TimeBudget, WaitingQueues};
pub use registry::PlayerRegistry;
pub use relay::GameSession;
