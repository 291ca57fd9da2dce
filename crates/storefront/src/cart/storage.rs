//! Durable key/value storage for cart snapshots.
//!
//! Mirrors a browser's local storage: string values under string keys, read
//! and written synchronously. The cart store is the only reader and writer of
//! its key; there is no coordination between processes sharing a directory,
//! so the last write wins.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors raised by a [`CartStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Key cannot be mapped to a storage slot.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Another thread panicked while holding the storage lock.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key/value storage.
pub trait CartStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// File Storage
// =============================================================================

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file which is synced and then renamed
/// over the target, so a reader never sees a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl CartStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).map_err(io_error(&temp_path))?;
        file.write_all(value.as_bytes())
            .map_err(io_error(&temp_path))?;
        file.sync_all().map_err(io_error(&temp_path))?;
        drop(file);

        fs::rename(&temp_path, &path).map_err(io_error(&path))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path)(e)),
        }
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("data"));

        assert_eq!(storage.get_item("falcon_cart").unwrap(), None);

        storage.set_item("falcon_cart", "{\"items\":[]}").unwrap();
        assert_eq!(
            storage.get_item("falcon_cart").unwrap().as_deref(),
            Some("{\"items\":[]}")
        );
        assert!(temp_dir.path().join("data/falcon_cart.json").exists());
        assert!(!temp_dir.path().join("data/falcon_cart.json.tmp").exists());
    }

    #[test]
    fn test_file_storage_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.set_item("falcon_cart", "first").unwrap();
        storage.set_item("falcon_cart", "second").unwrap();
        assert_eq!(
            storage.get_item("falcon_cart").unwrap().as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_file_storage_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.set_item("falcon_cart", "value").unwrap();
        storage.remove_item("falcon_cart").unwrap();
        assert_eq!(storage.get_item("falcon_cart").unwrap(), None);

        // Removing again is not an error
        storage.remove_item("falcon_cart").unwrap();
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        for key in ["", "../escape", "a/b", "dot.key"] {
            let err = storage.set_item(key, "x").unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)), "key {key:?}");
        }
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.set_item("k", "v").unwrap();
        assert_eq!(handle.get_item("k").unwrap().as_deref(), Some("v"));

        handle.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }
}
