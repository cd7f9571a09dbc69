//! Session configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! rest_seconds = 90
//! weight_step = 1.25
//! reset_clears_history = false
//! codec = "binary"
//! ```

use crate::core::{DEFAULT_REST_SECONDS, DEFAULT_WEIGHT_STEP};
use crate::storage::Codec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default storage key for the counters record.
pub const DEFAULT_COUNTERS_KEY: &str = "counters";
/// Default storage key for the history record.
pub const DEFAULT_HISTORY_KEY: &str = "history";

/// Errors produced while loading or validating a [`SessionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("rest_seconds must be greater than zero")]
    ZeroRestDuration,

    #[error("weight_step must be a positive finite number, got {0}")]
    InvalidWeightStep(f64),

    #[error("Storage key '{field}' must not be empty")]
    EmptyKey { field: &'static str },

    #[error("counters_key and history_key must differ (both '{0}')")]
    DuplicateKey(String),
}

/// Tunables for a [`SessionStore`](crate::SessionStore).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Rest timer length in seconds
    pub rest_seconds: u32,

    /// Kilograms added or removed per weight step
    pub weight_step: f64,

    /// Whether `reset_all` also clears the saved-set history
    pub reset_clears_history: bool,

    /// Storage key for the counters record
    pub counters_key: String,

    /// Storage key for the history record
    pub history_key: String,

    /// Record encoding
    pub codec: Codec,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rest_seconds: DEFAULT_REST_SECONDS,
            weight_step: DEFAULT_WEIGHT_STEP,
            reset_clears_history: true,
            counters_key: DEFAULT_COUNTERS_KEY.to_string(),
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            codec: Codec::Json,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Check values that serde cannot rule out on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rest_seconds == 0 {
            return Err(ConfigError::ZeroRestDuration);
        }
        if !self.weight_step.is_finite() || self.weight_step <= 0.0 {
            return Err(ConfigError::InvalidWeightStep(self.weight_step));
        }
        if self.counters_key.is_empty() {
            return Err(ConfigError::EmptyKey {
                field: "counters_key",
            });
        }
        if self.history_key.is_empty() {
            return Err(ConfigError::EmptyKey {
                field: "history_key",
            });
        }
        if self.counters_key == self.history_key {
            return Err(ConfigError::DuplicateKey(self.counters_key.clone()));
        }
        Ok(())
    }
}
