//! Directory-backed store, one file per key.

use super::{KeyValueStore, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "record";

/// Persists each key as `<dir>/<key>.record`.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// crash mid-write leaves the previous record intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension(format!("{EXTENSION}.tmp"));

        fs::write(&temp_path, value).map_err(|source| StorageError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &path).map_err(|source| StorageError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested").join("store");
        let store = FileStore::open(&dir).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn set_writes_one_file_per_key() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        store.set("counters", b"{}").unwrap();
        assert!(temp.path().join("counters.record").is_file());
        assert!(!temp.path().join("counters.record.tmp").exists());
        assert_eq!(store.get("counters").unwrap(), Some(b"{}".to_vec()));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        store.set("history", b"first").unwrap();
        store.set("history", b"second").unwrap();
        assert_eq!(store.get("history").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn missing_key_is_none() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        assert_eq!(store.get("history").unwrap(), None);
    }

    #[test]
    fn rejects_path_like_keys() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        for key in ["", "../escape", "a/b", "with space"] {
            assert!(matches!(
                store.set(key, b"x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
