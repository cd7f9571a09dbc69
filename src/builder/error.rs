//! Build errors for the session store builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a session store.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Storage not specified. Call .storage(store) before .build()")]
    MissingStorage,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
