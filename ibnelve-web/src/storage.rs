//! Key-value persistence behind the session store.
//!
//! The browser build writes to `window.localStorage`; native builds and tests
//! use an in-process map with the same contract.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Failures reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage area is reachable (no window, storage disabled, poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend refused an operation on a key.
    #[error("storage rejected {key:?}: {reason}")]
    Rejected {
        /// Key being read or written.
        key: String,
        /// Backend-provided reason.
        reason: String,
    },
}

/// String key-value space scoped to the browser origin.
pub trait KeyValueStore {
    /// Reads `key`, `None` when it was never written or has been removed.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the backend cannot be accessed.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the backend cannot be accessed.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the backend cannot be accessed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable("memory storage lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

/// `window.localStorage`, holding raw string values.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

#[cfg(target_arch = "wasm32")]
impl LocalStorageBackend {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window object".to_string()))?;
        window
            .local_storage()
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }

    fn rejected(key: &str, err: wasm_bindgen::JsValue) -> StorageError {
        StorageError::Rejected {
            key: key.to_string(),
            reason: format!("{err:?}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| Self::rejected(key, err))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| Self::rejected(key, err))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| Self::rejected(key, err))
    }
}
