//! Error types for the spec service.

use featreg_model::ModelError;
use featreg_storage::StorageError;
use thiserror::Error;

/// Result type for spec service operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors returned by [`SpecService`](crate::SpecService) operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The request is malformed or targets an archived project.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A point lookup matched nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// A concurrent apply won the version race for the same feature set.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The repository failed. Passed through unchanged.
    #[error("storage error: {0}")]
    Storage(StorageError),
}

impl SpecError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SpecError::InvalidArgument(_) => "invalid_argument",
            SpecError::NotFound(_) => "not_found",
            SpecError::Conflict(_) => "conflict",
            SpecError::Storage(_) => "storage",
        }
    }
}

impl From<ModelError> for SpecError {
    fn from(err: ModelError) -> Self {
        SpecError::InvalidArgument(err.to_string())
    }
}

impl From<StorageError> for SpecError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::VersionConflict { .. } => SpecError::Conflict(err.to_string()),
            other => SpecError::Storage(other),
        }
    }
}
