//! Builder for constructing session stores.

use crate::builder::error::BuildError;
use crate::config::SessionConfig;
use crate::session::SessionStore;
use crate::storage::KeyValueStore;

/// Builder for constructing a [`SessionStore`] with a fluent API.
pub struct SessionStoreBuilder {
    storage: Option<Box<dyn KeyValueStore>>,
    config: SessionConfig,
    load_persisted: bool,
}

impl SessionStoreBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            storage: None,
            config: SessionConfig::default(),
            load_persisted: true,
        }
    }

    /// Set the storage backend (required).
    pub fn storage(mut self, storage: impl KeyValueStore + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Replace the configuration.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether to restore persisted state during `build` (default `true`).
    pub fn load_persisted(mut self, load: bool) -> Self {
        self.load_persisted = load;
        self
    }

    /// Build the store.
    /// Returns an error if storage is missing or the config is invalid.
    pub fn build(self) -> Result<SessionStore, BuildError> {
        let storage = self.storage.ok_or(BuildError::MissingStorage)?;
        self.config.validate()?;

        let mut store = SessionStore::with_parts(storage, self.config);
        if self.load_persisted {
            store.load_persisted();
        }
        Ok(store)
    }
}

impl Default for SessionStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::storage::MemoryStore;

    #[test]
    fn builder_requires_storage() {
        let result = SessionStoreBuilder::new().build();
        assert!(matches!(result, Err(BuildError::MissingStorage)));
    }

    #[test]
    fn builder_validates_config() {
        let result = SessionStoreBuilder::new()
            .storage(MemoryStore::new())
            .config(SessionConfig {
                rest_seconds: 0,
                ..SessionConfig::default()
            })
            .build();

        assert!(matches!(
            result,
            Err(BuildError::InvalidConfig(ConfigError::ZeroRestDuration))
        ));
    }

    #[test]
    fn builder_applies_config() {
        let store = SessionStoreBuilder::new()
            .storage(MemoryStore::new())
            .config(SessionConfig {
                rest_seconds: 90,
                weight_step: 1.25,
                ..SessionConfig::default()
            })
            .build()
            .unwrap();

        assert_eq!(store.timer().remaining_seconds, 90);
        assert_eq!(store.config().weight_step, 1.25);
    }

    #[test]
    fn skipping_load_ignores_persisted_state() {
        let storage = MemoryStore::new();
        SessionStore::new(storage.clone()).increment_reps();

        let restored = SessionStoreBuilder::new()
            .storage(storage.clone())
            .build()
            .unwrap();
        assert_eq!(restored.counters().reps, 1);

        let fresh = SessionStoreBuilder::new()
            .storage(storage)
            .load_persisted(false)
            .build()
            .unwrap();
        assert_eq!(fresh.counters().reps, 0);
    }
}
