//! Crate-level failures outside the API error path.

use thiserror::Error;

use crate::traits::StorageError;

#[derive(Debug, Error)]
pub enum BlueprintError {
    /// The persistent store could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A record could not be serialized for storage
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration value was present but unusable
    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    /// No home directory to place default files in
    #[error("Could not determine home directory")]
    NoHomeDirectory,
}

pub type BlueprintResult<T> = Result<T, BlueprintError>;
