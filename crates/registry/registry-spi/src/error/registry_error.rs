//! Registry error types.

use std::path::PathBuf;

use ledger_spi::LedgerError;
use thiserror::Error;

/// Errors that can occur while selecting or promoting a run.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No finished run carries a finite value for the metric.
    #[error("No candidate runs with metric '{metric}'")]
    NoCandidate { metric: String },

    /// None of the artifact locations for the run exist.
    #[error("Artifact for run {run_id} not found (tried {})", display_paths(.tried))]
    ArtifactNotFound { run_id: String, tried: Vec<PathBuf> },

    /// Reading the source or writing the slot failed. The slot is unchanged.
    #[error("Promotion I/O error at {path}: {source}")]
    PromotionIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact exists but does not decode as a fitted model.
    #[error("Invalid artifact at {path}: {reason}")]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl RegistryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RegistryError::PromotionIo {
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
