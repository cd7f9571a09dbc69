//! Durable key-value storage for session data.
//!
//! Each logical entity (counters, history) is written as one record under
//! its own key. A record wraps the data in a small versioned envelope so a
//! future format change can be detected instead of misread.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Version identifier for the record format
pub const RECORD_VERSION: u32 = 1;

/// Byte-oriented key-value backend.
///
/// Implementations must make a completed `set` visible to every later `get`
/// on the same key.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

/// Serializable envelope around a persisted value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record<T> {
    /// Record format version
    pub version: u32,

    /// When the record was written
    pub saved_at: DateTime<Utc>,

    /// The persisted value
    pub data: T,
}

/// Encoding used for records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// Human-readable JSON
    #[default]
    Json,
    /// Compact bincode encoding
    Binary,
}

impl Codec {
    /// Wrap `data` in a current-version record and encode it.
    pub fn encode<T: Serialize>(&self, data: &T) -> Result<Vec<u8>, StorageError> {
        let record = Record {
            version: RECORD_VERSION,
            saved_at: Utc::now(),
            data,
        };

        match self {
            Self::Json => serde_json::to_vec(&record)
                .map_err(|e| StorageError::SerializationFailed(e.to_string())),
            Self::Binary => bincode::serialize(&record)
                .map_err(|e| StorageError::SerializationFailed(e.to_string())),
        }
    }

    /// Decode a record and return its data.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, StorageError> {
        let record: Record<T> = match self {
            Self::Json => serde_json::from_slice(bytes)
                .map_err(|e| StorageError::DeserializationFailed(e.to_string()))?,
            Self::Binary => bincode::deserialize(bytes)
                .map_err(|e| StorageError::DeserializationFailed(e.to_string()))?,
        };

        if record.version != RECORD_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: record.version,
                supported: RECORD_VERSION,
            });
        }

        Ok(record.data)
    }
}

/// Encode `data` and store it under `key`.
pub fn save_record<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    codec: Codec,
    data: &T,
) -> Result<(), StorageError> {
    let bytes = codec.encode(data)?;
    store.set(key, &bytes)
}

/// Load and decode the record under `key`.
///
/// Returns `Ok(None)` if the key holds nothing.
pub fn load_record<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    codec: Codec,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(bytes) => codec.decode(&bytes).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Counters, History, HistoryEntry};

    fn sample_history() -> History {
        let mut history = History::new();
        history.push(HistoryEntry::from_counters(&Counters {
            reps: 3,
            sets: 2,
            weight: 5.0,
        }));
        history.push(HistoryEntry::from_counters(&Counters {
            reps: 8,
            sets: 3,
            weight: 42.5,
        }));
        history
    }

    #[test]
    fn json_record_carries_version() {
        let bytes = Codec::Json.encode(&Counters::new()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["version"], RECORD_VERSION);
        assert_eq!(value["data"]["reps"], 0);
    }

    #[test]
    fn both_codecs_restore_history_exactly() {
        let history = sample_history();
        for codec in [Codec::Json, Codec::Binary] {
            let bytes = codec.encode(&history).unwrap();
            let restored: History = codec.decode(&bytes).unwrap();
            assert_eq!(restored, history, "codec {codec:?}");
        }
    }

    #[test]
    fn both_codecs_restore_inexact_weights_exactly() {
        for weight in [0.9999999999999999, 0.30000000000000004, 0.1, 1.1 * 3.0, 123.456789] {
            let counters = Counters {
                reps: 1,
                sets: 1,
                weight,
            };
            for codec in [Codec::Json, Codec::Binary] {
                let bytes = codec.encode(&counters).unwrap();
                let restored: Counters = codec.decode(&bytes).unwrap();
                assert_eq!(restored.weight.to_bits(), weight.to_bits(), "codec {codec:?}");
            }
        }
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let json = r#"{"version":99,"saved_at":"2024-01-01T00:00:00Z","data":{"reps":1,"sets":1,"weight":0.0}}"#;
        let result: Result<Counters, _> = Codec::Json.decode(json.as_bytes());
        assert!(matches!(
            result,
            Err(StorageError::UnsupportedVersion {
                found: 99,
                supported: RECORD_VERSION
            })
        ));
    }

    #[test]
    fn decode_rejects_garbage() {
        let result: Result<Counters, _> = Codec::Json.decode(b"not json");
        assert!(matches!(result, Err(StorageError::DeserializationFailed(_))));

        let result: Result<History, _> = Codec::Binary.decode(&[0xff, 0x01]);
        assert!(matches!(result, Err(StorageError::DeserializationFailed(_))));
    }

    #[test]
    fn save_then_load_record() {
        let store = MemoryStore::new();
        let counters = Counters {
            reps: 4,
            sets: 1,
            weight: 12.5,
        };

        save_record(&store, "counters", Codec::Json, &counters).unwrap();
        let loaded: Option<Counters> = load_record(&store, "counters", Codec::Json).unwrap();
        assert_eq!(loaded, Some(counters));
    }

    #[test]
    fn load_missing_record_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<Counters> = load_record(&store, "counters", Codec::Json).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn codec_names_in_config() {
        assert_eq!(serde_json::to_string(&Codec::Json).unwrap(), "\"json\"");
        assert_eq!(serde_json::to_string(&Codec::Binary).unwrap(), "\"binary\"");
    }
}
