//! Training error types.

use std::path::PathBuf;

use classifier_spi::{ClassifierError, ModelKind};
use feature_spi::FeatureError;
use ledger_spi::LedgerError;
use thiserror::Error;

/// Errors that can occur while preparing data or running a sweep.
#[derive(Error, Debug)]
pub enum TrainingError {
    /// A table could not be read or did not match the feature contract.
    #[error("Bad data in {path}: {reason}")]
    Data { path: PathBuf, reason: String },

    /// Filesystem failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Grid point names a hyperparameter the family does not have.
    #[error("{family} has no hyperparameter '{name}'")]
    UnknownParameter { family: ModelKind, name: String },

    /// Grid point value has the wrong type.
    #[error("{family} hyperparameter '{name}' expects {expected}, got {actual}")]
    ParameterType {
        family: ModelKind,
        name: String,
        expected: &'static str,
        actual: String,
    },

    /// Sweep plan could not be parsed or is empty.
    #[error("Invalid sweep plan: {0}")]
    Plan(String),

    /// Scaler or model could not be persisted.
    #[error("Persisting {what} failed: {reason}")]
    Persist { what: String, reason: String },

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl TrainingError {
    pub fn data(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TrainingError::Data {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TrainingError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_parameter_error() {
        let error = TrainingError::UnknownParameter {
            family: ModelKind::RandomForest,
            name: "alpha".to_string(),
        };
        assert_eq!(error.to_string(), "RandomForest has no hyperparameter 'alpha'");
    }

    #[test]
    fn test_parameter_type_error() {
        let error = TrainingError::ParameterType {
            family: ModelKind::GradientBoosting,
            name: "n_estimators".to_string(),
            expected: "non-negative integer",
            actual: "string".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "GradientBoosting hyperparameter 'n_estimators' expects non-negative integer, got string"
        );
    }

    #[test]
    fn test_transparent_sources() {
        let error: TrainingError = ClassifierError::NotFitted.into();
        assert_eq!(error.to_string(), "Model must be fitted before prediction");
        let error: TrainingError = FeatureError::invalid("income", "is missing").into();
        assert!(error.to_string().contains("income"));
    }
}
