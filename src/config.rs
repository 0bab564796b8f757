//! Server configuration module
//! Handles dynamic configuration parameters for the matchmaking server

use crate::constants::{DEFAULT_HOST, DEFAULT_MATCH_INTERVAL_MS, DEFAULT_PORT};
use crate::error::{QuickpairError, Result};
use std::env;
use std::time::Duration;

/// Server configuration parameters
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Minimum interval between two match requests from the same player
    pub match_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            match_interval: Duration::from_millis(DEFAULT_MATCH_INTERVAL_MS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables if available.
    ///
    /// `QUICKPAIR_PORT` takes precedence over the plain `PORT` variable
    /// that hosting platforms commonly inject.
    pub fn from_env() -> Result<Self> {
        let host = env::var("QUICKPAIR_HOST").unwrap_or(DEFAULT_HOST.to_string());

        let port = match env::var("QUICKPAIR_PORT").or_else(|_| env::var("PORT")) {
            Ok(p) => p.parse().map_err(|_| {
                QuickpairError::ConfigError(format!("Invalid port value: {}", p))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let interval_ms = match env::var("QUICKPAIR_MATCH_INTERVAL_MS") {
            Ok(ms) => ms.parse().map_err(|_| {
                QuickpairError::ConfigError(format!("Invalid match interval: {}", ms))
            })?,
            Err(_) => DEFAULT_MATCH_INTERVAL_MS,
        };

        Ok(Self {
            host,
            port,
            match_interval: Duration::from_millis(interval_ms),
        })
    }
}
