//! Error types for the zmesh registry
//!
//! Lookup misses are not errors anywhere in this crate; they surface as
//! `Option::None`. Errors are reserved for the persistence boundary and
//! for configuration problems.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the zmesh registry
#[derive(Error, Debug)]
pub enum Error {
    /// State file could not be read during startup
    #[error("unable to read network state from {path}: {source}")]
    ReadState {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted state could not be decoded
    #[error("unable to decode network state from {path}: {source}")]
    DecodeState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Registry contents could not be encoded for persistence
    #[error("unable to encode network state: {0}")]
    EncodeState(#[source] serde_json::Error),

    /// State file could not be written during shutdown
    #[error("unable to write network state to {path}: {source}")]
    WriteState {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
