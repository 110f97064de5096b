//! File-backed persistent storage.
//!
//! All keys live in one JSON object, by default at
//! `~/.blueprint/storage.json`. A missing file reads as empty storage.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::traits::{PersistentStorage, StorageError};

/// The storage directory name under the home directory.
const STORAGE_DIR: &str = ".blueprint";

/// The storage file name.
const STORAGE_FILE: &str = "storage.json";

type Entries = BTreeMap<String, String>;

/// JSON-file implementation of [`PersistentStorage`].
///
/// Writes are read-modify-write under a mutex so two handles in the same
/// process cannot interleave.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Storage at the default location.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        Some(Self::with_path(Self::default_path()?))
    }

    /// Storage at an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `~/.blueprint/storage.json`
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::home_dir()?.join(STORAGE_DIR).join(STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let file = File::open(&self.path).map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            }
        }

        let file =
            File::create(&self.path).map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    fn update<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::WriteFailed("storage lock poisoned".to_string()))?;
        let mut entries = self.read_entries()?;
        f(&mut entries);
        self.write_entries(&entries)
    }
}

impl PersistentStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_in(temp_dir: &TempDir) -> FileStorage {
        FileStorage::with_path(temp_dir.path().join(STORAGE_DIR).join(STORAGE_FILE))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);
        assert_eq!(storage.get("token").unwrap(), None);
    }

    #[test]
    fn test_set_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);

        storage.set("token", "abc123").unwrap();
        assert!(storage.path().exists());
        assert_eq!(storage.get("token").unwrap(), Some("abc123".to_string()));
    }

    #[test]
    fn test_keys_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);

        storage.set("token", "abc123").unwrap();
        storage.set("user", r#"{"id":"u1"}"#).unwrap();
        storage.remove("token").unwrap();

        assert_eq!(storage.get("token").unwrap(), None);
        assert_eq!(storage.get("user").unwrap(), Some(r#"{"id":"u1"}"#.to_string()));
    }

    #[test]
    fn test_remove_without_file_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);
        storage.remove("token").unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);
        fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        fs::write(storage.path(), "not json").unwrap();

        assert!(matches!(storage.get("token"), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_default_path_under_home() {
        if let Some(path) = FileStorage::default_path() {
            assert!(path.ends_with(".blueprint/storage.json"));
        }
    }
}
