//! Repcount: workout session state for a single-screen rep counter
//!
//! Repcount models everything a workout logging screen needs besides its
//! widgets: rep and set counters, a weight adjuster, a rest timer, and a
//! persisted history of saved sets. A renderer reads [`SessionSnapshot`]s
//! and forwards user actions as [`Intent`]s.
//!
//! # Layout
//!
//! - [`core`]: pure values (counters, history, rest timer countdown)
//! - [`session`]: the [`SessionStore`] that owns and persists them
//! - [`storage`]: key-value backends and the record format
//! - [`config`]: tunables, loadable from TOML
//!
//! # Example
//!
//! ```rust
//! use repcount::{MemoryStore, SessionStore};
//!
//! let storage = MemoryStore::new();
//! let mut store = SessionStore::new(storage.clone());
//!
//! store.increment_reps();
//! store.increment_reps();
//! store.increment_reps();
//! store.increase_weight();
//! let entry = store.save_set();
//!
//! assert_eq!((entry.set, entry.reps, entry.weight), (0, 3, 2.5));
//! assert_eq!(store.counters().sets, 1);
//!
//! // A new session on the same storage picks up where this one left off.
//! let restored = SessionStore::new(storage);
//! assert_eq!(restored.history().len(), 1);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod logging;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use builder::{BuildError, SessionStoreBuilder};
pub use config::{ConfigError, SessionConfig};
pub use crate::core::{Counters, History, HistoryEntry, TimerPhase, TimerState};
pub use session::{Intent, SessionSnapshot, SessionStore};
pub use storage::{Codec, FileStore, KeyValueStore, MemoryStore, StorageError};
