//! In-memory storage for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{PersistentStorage, StorageError};

/// In-memory [`PersistentStorage`] with failure injection.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the session layer wrote.
///
/// # Example
///
/// ```ignore
/// let storage = InMemoryStorage::with_entries([("token", "abc123")]);
/// assert_eq!(storage.get("token")?, Some("abc123".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    read_should_fail: Arc<Mutex<bool>>,
    write_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let storage = Self::new();
        {
            let mut map = storage.entries.lock().unwrap();
            for (k, v) in entries {
                map.insert(k.into(), v.into());
            }
        }
        storage
    }

    pub fn set_read_should_fail(&self, should_fail: bool) {
        *self.read_should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    /// Snapshot of the stored entries.
    pub fn entries(&self) -> HashMap<String, String> {
        self.entries.lock().unwrap().clone()
    }
}

impl PersistentStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if *self.read_should_fail.lock().unwrap() {
            return Err(StorageError::ReadFailed("Mock read failure".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.write_should_fail.lock().unwrap() {
            return Err(StorageError::WriteFailed("Mock write failure".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if *self.write_should_fail.lock().unwrap() {
            return Err(StorageError::WriteFailed("Mock write failure".to_string()));
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
