//! Persistent key-value storage trait abstraction.
//!
//! The session layer keeps its token and user record under string keys in a
//! durable store. Reads are synchronous.

/// Storage operation errors.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Failed to read the backing store
    ReadFailed(String),
    /// Failed to write the backing store
    WriteFailed(String),
    /// The backing store exists but could not be decoded
    Corrupt(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ReadFailed(msg) => write!(f, "Failed to read storage: {}", msg),
            StorageError::WriteFailed(msg) => write!(f, "Failed to write storage: {}", msg),
            StorageError::Corrupt(msg) => write!(f, "Storage is corrupt: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Durable string storage keyed by name.
///
/// Implementations include the JSON-file backed [`crate::adapters::FileStorage`]
/// and the in-memory mock used in tests.
pub trait PersistentStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
