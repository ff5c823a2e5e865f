//! Feature error types.

use thiserror::Error;

/// Errors that can occur while building or scaling feature vectors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// A raw input field is missing, non-numeric or non-finite.
    #[error("Invalid input field '{field}': {reason}")]
    InputValidation { field: String, reason: String },

    /// A table header does not match the contract's column order.
    #[error("Feature schema mismatch: expected {expected:?}, got {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Not enough rows to fit.
    #[error("Insufficient data: need at least {required} rows, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The scaler was used before fitting.
    #[error("Scaler must be fitted before transform")]
    NotFitted,

    /// Persisted state could not be encoded or decoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl FeatureError {
    /// Shorthand for an input validation failure.
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FeatureError::InputValidation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Field name for input validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            FeatureError::InputValidation { field, .. } => Some(field),
            _ => None,
        }
    }
}
