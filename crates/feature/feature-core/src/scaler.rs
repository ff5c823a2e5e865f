//! Standard scaler

use feature_spi::{
    FeatureError, FeatureVector, Result, ScalerStep, FEATURE_COUNT, FEATURE_NAMES,
};
use serde::{Deserialize, Serialize};

/// Standardize every feature column to zero mean and unit variance.
///
/// Uses the population standard deviation. A constant column gets a scale
/// of 1.0 so it maps to zero instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    feature_names: Vec<String>,
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
    n_samples_seen: usize,
    fitted: bool,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            mean: [0.0; FEATURE_COUNT],
            scale: [1.0; FEATURE_COUNT],
            n_samples_seen: 0,
            fitted: false,
        }
    }

    /// Fit on a table and return the fitted scaler.
    pub fn fitted_on(rows: &[FeatureVector]) -> Result<Self> {
        let mut scaler = Self::new();
        scaler.fit(rows)?;
        Ok(scaler)
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; FEATURE_COUNT] {
        &self.scale
    }

    pub fn n_samples_seen(&self) -> usize {
        self.n_samples_seen
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Encode the fitted state.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        if !self.fitted {
            return Err(FeatureError::NotFitted);
        }
        serde_json::to_vec_pretty(self).map_err(|e| FeatureError::Serialization(e.to_string()))
    }

    /// Decode persisted state. Rejects unfitted state and any column
    /// layout other than the current contract's.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let scaler: StandardScaler =
            serde_json::from_slice(bytes).map_err(|e| FeatureError::Serialization(e.to_string()))?;
        if !scaler.fitted {
            return Err(FeatureError::NotFitted);
        }
        if scaler.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
            return Err(FeatureError::SchemaMismatch {
                expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                actual: scaler.feature_names,
            });
        }
        Ok(scaler)
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalerStep for StandardScaler {
    fn fit(&mut self, rows: &[FeatureVector]) -> Result<()> {
        if rows.is_empty() {
            return Err(FeatureError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        let n = rows.len() as f64;

        for col in 0..FEATURE_COUNT {
            let mean = rows.iter().map(|r| r[col]).sum::<f64>() / n;
            let var = rows.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / n;
            let std_dev = var.sqrt();
            self.mean[col] = mean;
            self.scale[col] = if std_dev == 0.0 || !std_dev.is_finite() {
                1.0
            } else {
                std_dev
            };
        }

        self.n_samples_seen = rows.len();
        self.fitted = true;
        Ok(())
    }

    fn transform_row(&self, row: &FeatureVector) -> Result<FeatureVector> {
        if !self.fitted {
            return Err(FeatureError::NotFitted);
        }
        let mut out = [0.0; FEATURE_COUNT];
        for (col, value) in out.iter_mut().enumerate() {
            *value = (row[col] - self.mean[col]) / self.scale[col];
        }
        Ok(out)
    }

    fn inverse_transform_row(&self, row: &FeatureVector) -> Result<FeatureVector> {
        if !self.fitted {
            return Err(FeatureError::NotFitted);
        }
        let mut out = [0.0; FEATURE_COUNT];
        for (col, value) in out.iter_mut().enumerate() {
            *value = row[col] * self.scale[col] + self.mean[col];
        }
        Ok(out)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn name(&self) -> &str {
        "standardize"
    }
}
