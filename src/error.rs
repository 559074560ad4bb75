//! Error types
//!
//! Configuration errors are fatal and surface before the first frame.
//! Store errors are logged and never stop the simulation.

use thiserror::Error;

/// Invalid or missing stage generation parameters
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("no random source supplied; pass a seed for deterministic runs")]
    MissingRandomSource,
    #[error("failed to parse stage config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read stage config: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Failures of the persistent score store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score store encoding failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("score store unavailable: {0}")]
    Unavailable(String),
}
