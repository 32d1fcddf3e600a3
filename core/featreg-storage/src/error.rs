//! Error types for the storage layer.

use featreg_model::ModelError;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row no longer converts into a model type.
    #[error("invalid stored data: {0}")]
    Model(#[from] ModelError),

    /// The stored version is not the one the save was computed against.
    /// A version of 0 means the feature set did not exist.
    #[error(
        "feature set \"{project}/{name}\" was modified concurrently: expected stored version {expected}, found {found}"
    )]
    VersionConflict {
        name: String,
        project: String,
        expected: u32,
        found: u32,
    },

    /// A thread panicked while holding the registry lock.
    #[error("registry lock poisoned")]
    Poisoned,
}
