//! Error types for the record model.

use thiserror::Error;

/// Result type alias for model parsing.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while parsing model values from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("observed version '{0}' is not of the form <operator>/<runtime>")]
    MalformedObservedVersion(String),

    #[error("invalid version '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },
}
