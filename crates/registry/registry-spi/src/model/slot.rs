use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The single deployed model and the scaler it was trained with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServingSlot {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
}

impl Default for ServingSlot {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/model.json"),
            scaler_path: PathBuf::from("processors/scaler.json"),
        }
    }
}

impl ServingSlot {
    pub fn new(model_path: impl Into<PathBuf>, scaler_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            scaler_path: scaler_path.into(),
        }
    }

    /// Both paths resolved against `base`.
    pub fn rooted_at(&self, base: &Path) -> Self {
        Self::new(base.join(&self.model_path), base.join(&self.scaler_path))
    }

    /// Sidecar next to the model: `models/model.json` -> `models/model.meta.json`.
    pub fn metadata_path(&self) -> PathBuf {
        self.model_path.with_extension("meta.json")
    }
}
