//! Ledger error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while recording or querying runs.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// No experiment with this id.
    #[error("Experiment not found: {0}")]
    ExperimentNotFound(String),

    /// No active run with this id. Ended runs are no longer writable.
    #[error("Run not found or already ended: {0}")]
    RunNotFound(String),

    /// Name that cannot be used as a path component.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Metric value that could not be stored and read back as a number.
    #[error("Invalid metric '{name}': {value} is not finite")]
    InvalidMetric { name: String, value: f64 },

    /// Filesystem failure in a file-backed store.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored document could not be decoded.
    #[error("Corrupt ledger entry at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Value could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl LedgerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LedgerError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_not_found_error() {
        let error = LedgerError::RunNotFound("abc".to_string());
        assert_eq!(error.to_string(), "Run not found or already ended: abc");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let error = LedgerError::io(
            "/tmp/mlruns/1/meta.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(error.to_string().contains("/tmp/mlruns/1/meta.json"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_invalid_metric_names_metric() {
        let error = LedgerError::InvalidMetric {
            name: "accuracy".to_string(),
            value: f64::NAN,
        };
        assert_eq!(error.to_string(), "Invalid metric 'accuracy': NaN is not finite");
    }

    #[test]
    fn test_invalid_name_error() {
        let error = LedgerError::InvalidName {
            name: "../x".to_string(),
            reason: "contains a path separator".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid name '../x': contains a path separator"
        );
    }
}
