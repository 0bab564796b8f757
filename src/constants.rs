// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const WS_PATH: &str = "ws";

// Matchmaking constants
pub const DEFAULT_MATCH_INTERVAL_MS: u64 = 1000;

// Version tag sent to clients on connect for staleness detection
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
