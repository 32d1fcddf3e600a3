//! Error types for model conversion and validation.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while converting or validating model types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A required field was empty.
    #[error("no {0} provided")]
    MissingField(&'static str),

    /// A name contains characters outside the allowed set.
    #[error("invalid characters in {field} \"{name}\"")]
    InvalidName { field: &'static str, name: String },

    /// An entity or feature name appears more than once in a feature set.
    #[error("duplicate field name \"{0}\" in feature set")]
    DuplicateName(String),

    /// An entity or feature uses a column name the registry reserves.
    #[error("field name \"{0}\" is reserved")]
    ReservedName(String),

    /// A store configuration blob could not be decoded.
    #[error("invalid store config: {0}")]
    InvalidConfig(String),

    /// A feature key string is not of the form `project/feature_set:feature`.
    #[error("invalid feature key: {0}")]
    InvalidFeatureKey(String),
}
