//! Configuration types for the zmesh registry

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the persisted network state, relative to the
/// working directory of the embedding process.
pub const DEFAULT_STATE_FILE: &str = "simple-network.json";

/// Registry configuration
///
/// Both fields are supplied by the surrounding process; the registry
/// itself never decides where its state lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Path of the JSON state file read at startup and written at shutdown
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Skip hydration from the state file at startup
    #[serde(default)]
    pub reset: bool,
}

impl NetworkConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            state_file: default_state_file(),
            reset: false,
        }
    }

    /// Set the state file path
    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = path.into();
        self
    }

    /// Enable or disable the reset flag
    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.state_file.as_os_str().is_empty() {
            return Err(crate::Error::config("state file path cannot be empty"));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_state_file() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_FILE)
}
