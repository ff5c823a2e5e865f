//! Scaler fit and persistence.

use std::path::Path;

use feature_core::StandardScaler;
use feature_spi::FeatureVector;
use ledger_core::write_atomic;
use training_spi::{Result, TrainingError};

/// Fit a [`StandardScaler`] on the training rows and write it to `path`.
///
/// The file is replaced atomically; a server starting mid-sweep reads
/// either the previous scaler or the new one.
pub fn fit_scaler(x_train: &[FeatureVector], path: &Path) -> Result<StandardScaler> {
    let scaler = StandardScaler::fitted_on(x_train)?;
    let bytes = scaler.to_json_bytes()?;
    write_atomic(path, &bytes).map_err(|e| TrainingError::Persist {
        what: format!("scaler to {}", path.display()),
        reason: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), rows = x_train.len(), "scaler persisted");
    Ok(scaler)
}
