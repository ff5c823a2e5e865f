//! Promotion of a run's artifact into the serving slot.

use std::fs;
use std::path::{Path, PathBuf};

use classifier_core::Estimator;
use ledger_core::write_atomic;
use ledger_spi::{LedgerError, RunRecord};
use registry_spi::{
    Confirmation, PromotionMetadata, PromotionReport, RegistryError, Result, ServingSlot,
};

/// Conventional artifact locations under `<root>/<experiment_id>/<run_id>/`,
/// tried in order after the run's recorded artifact.
pub const ARTIFACT_PATTERNS: [&str; 4] = [
    "artifacts/model.json",
    "artifacts/LogisticRegression_model/model.json",
    "artifacts/RandomForest_model/model.json",
    "artifacts/GradientBoosting_model/model.json",
];

/// Copies a run's model into the serving slot
#[derive(Debug, Clone)]
pub struct ModelPromoter {
    tracking_root: PathBuf,
    slot: ServingSlot,
}

impl ModelPromoter {
    pub fn new(tracking_root: impl Into<PathBuf>, slot: ServingSlot) -> Self {
        Self {
            tracking_root: tracking_root.into(),
            slot,
        }
    }

    pub fn slot(&self) -> &ServingSlot {
        &self.slot
    }

    /// Candidate paths for a run, in the order they are tried.
    pub fn candidates(&self, record: &RunRecord) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(locator) = &record.artifact {
            if !locator.contains("://") {
                let path = Path::new(locator);
                paths.push(if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    self.tracking_root.join(path)
                });
            }
        }
        let run_dir = self
            .tracking_root
            .join(&record.experiment_id)
            .join(&record.run_id);
        for pattern in ARTIFACT_PATTERNS {
            let path = run_dir.join(pattern);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }

    /// First candidate that exists as a file.
    pub fn locate(&self, record: &RunRecord) -> Result<PathBuf> {
        let tried = self.candidates(record);
        match tried.iter().find(|p| p.is_file()) {
            Some(found) => Ok(found.clone()),
            None => Err(RegistryError::ArtifactNotFound {
                run_id: record.run_id.clone(),
                tried,
            }),
        }
    }

    /// Swap the run's model into the slot and write the metadata sidecar.
    ///
    /// The artifact must decode as a fitted model before the slot is
    /// touched. Promoting the same run again writes identical bytes.
    pub fn promote(
        &self,
        record: &RunRecord,
        _confirmation: Confirmation,
    ) -> Result<PromotionReport> {
        let source = self.locate(record)?;
        let bytes = fs::read(&source).map_err(|e| RegistryError::io(&source, e))?;
        Estimator::from_json_bytes(&bytes).map_err(|e| RegistryError::InvalidArtifact {
            path: source.clone(),
            reason: e.to_string(),
        })?;

        let metadata = PromotionMetadata {
            run_id: record.run_id.clone(),
            experiment_name: record.experiment_name.clone(),
            params: record.params.clone(),
            metrics: record.metrics.clone(),
            source: source.clone(),
        };
        let metadata_bytes = serde_json::to_vec_pretty(&metadata)
            .map_err(|e| RegistryError::Serialization(e.to_string()))?;

        let bytes_copied = write_slot_file(&self.slot.model_path, &bytes)?;
        let metadata_path = self.slot.metadata_path();
        write_slot_file(&metadata_path, &metadata_bytes)?;

        tracing::info!(
            run_id = %record.run_id,
            experiment = %record.experiment_name,
            source = %source.display(),
            destination = %self.slot.model_path.display(),
            bytes = bytes_copied,
            "promoted model"
        );

        Ok(PromotionReport {
            run_id: record.run_id.clone(),
            source,
            destination: self.slot.model_path.clone(),
            metadata_path,
            bytes_copied,
        })
    }
}

/// Atomic replace of one slot file. The slot is unchanged on error.
fn write_slot_file(path: &Path, bytes: &[u8]) -> Result<u64> {
    write_atomic(path, bytes).map_err(|e| match e {
        LedgerError::Io { path, source } => RegistryError::io(path, source),
        other => RegistryError::Ledger(other),
    })
}
