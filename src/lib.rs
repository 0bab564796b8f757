//! Quickpair - a WebSocket matchmaking and relay server
//!
//! Pairs anonymous clients into two-party game sessions keyed by a chosen
//! time budget, then relays board state and outcome events between exactly
//! those two parties until the session ends.

pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod handlers;

// Re-export main components
pub use config::*;
pub use constants::*;
