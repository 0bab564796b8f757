use std::error::Error;
use std::fmt;
use std::sync::PoisonError;

#[derive(Debug)]
pub enum QuickpairError {
    // Lobby errors
    LobbyLock(String),

    // Configuration errors
    ConfigError(String),
}

impl fmt::Display for QuickpairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LobbyLock(msg) => write!(f, "Lobby lock error: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for QuickpairError {}

// Converting from PoisonError to facilitate poisoned mutex handling
impl<T> From<PoisonError<T>> for QuickpairError {
    fn from(err: PoisonError<T>) -> Self {
        QuickpairError::LobbyLock(format!("Mutex poisoned: {}", err))
    }
}

// Generic result type for quickpair
pub type Result<T> = std::result::Result<T, QuickpairError>;
