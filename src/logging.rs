//! Tracing subscriber setup for hosts.
//!
//! The library only emits `tracing` events. Applications that do not bring
//! their own subscriber can call [`init`] once at startup to print events to
//! stderr, filtered by `RUST_LOG` or the given default directive.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Errors that may occur while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The default filter directive could not be parsed.
    #[error("Invalid log filter '{directive}': {source}")]
    Filter {
        directive: String,
        source: tracing_subscriber::filter::ParseError,
    },
    /// Another global subscriber was installed first.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(String),
}

/// Install a formatting subscriber.
///
/// `RUST_LOG` takes precedence over `default_directive`. Subsequent calls
/// are no-ops.
pub fn init(default_directive: &str) -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive).map_err(|source| LoggingError::Filter {
            directive: default_directive.to_string(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError::SetGlobal(e.to_string()))?;

    let _ = INSTALLED.set(());
    Ok(())
}
