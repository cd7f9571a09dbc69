//! Builder API for session store construction.
//!
//! ```rust
//! use repcount::{MemoryStore, SessionConfig, SessionStore};
//!
//! let store = SessionStore::builder()
//!     .storage(MemoryStore::new())
//!     .config(SessionConfig {
//!         rest_seconds: 90,
//!         ..SessionConfig::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.timer().remaining_seconds, 90);
//! ```

pub mod error;
mod session;

pub use error::BuildError;
pub use session::SessionStoreBuilder;
