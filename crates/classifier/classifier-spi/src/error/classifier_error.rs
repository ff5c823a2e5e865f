//! Classifier error types.

use thiserror::Error;

/// Errors that can occur while fitting or evaluating a classifier.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// Invalid hyperparameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Not enough rows for the operation.
    #[error("Insufficient data: need at least {required} rows, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Feature rows and labels disagree in length.
    #[error("Dimension mismatch: {rows} rows but {labels} labels")]
    DimensionMismatch { rows: usize, labels: usize },

    /// Labels cannot support this model (e.g. a single class).
    #[error("Degenerate labels: {0}")]
    DegenerateLabels(String),

    /// A label other than 0 or 1.
    #[error("Invalid label {0}: expected 0 or 1")]
    InvalidLabel(u8),

    /// Model has not been fitted yet.
    #[error("Model must be fitted before prediction")]
    NotFitted,

    /// Numerical computation error.
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Persisted model could not be encoded or decoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl ClassifierError {
    /// Shorthand for an invalid parameter.
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ClassifierError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_error() {
        let error = ClassifierError::invalid("C", "must be positive");
        assert_eq!(error.to_string(), "Invalid parameter 'C': must be positive");
    }

    #[test]
    fn test_degenerate_labels_error() {
        let error = ClassifierError::DegenerateLabels("only class 0 present".to_string());
        assert_eq!(
            error.to_string(),
            "Degenerate labels: only class 0 present"
        );
    }

    #[test]
    fn test_invalid_label_error() {
        assert_eq!(
            ClassifierError::InvalidLabel(7).to_string(),
            "Invalid label 7: expected 0 or 1"
        );
    }

    #[test]
    fn test_all_variants_can_be_constructed() {
        let errors = vec![
            ClassifierError::invalid("x", "y"),
            ClassifierError::InsufficientData {
                required: 2,
                actual: 1,
            },
            ClassifierError::DimensionMismatch { rows: 1, labels: 2 },
            ClassifierError::DegenerateLabels("x".to_string()),
            ClassifierError::InvalidLabel(2),
            ClassifierError::NotFitted,
            ClassifierError::NumericalError("x".to_string()),
            ClassifierError::Serialization("x".to_string()),
        ];
        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
