//! Training Consumer API
//!
//! Configuration types for data preparation and training sweeps.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use training_spi::{
    ConfigurationOutcome, DataSource, Dataset, FamilyPlan, HyperparameterGrid, OutcomeStatus,
    Result, SweepPlan, SweepReport, TrainingError,
};

/// Label column in raw and processed tables.
pub const LABEL_COLUMN: &str = "default";

/// Locations of the four processed tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    pub processed_dir: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new("data/processed")
    }
}

impl DataPaths {
    pub fn new(processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            processed_dir: processed_dir.into(),
        }
    }

    pub fn x_train(&self) -> PathBuf {
        self.processed_dir.join("X_train.csv")
    }

    pub fn x_test(&self) -> PathBuf {
        self.processed_dir.join("X_test.csv")
    }

    pub fn y_train(&self) -> PathBuf {
        self.processed_dir.join("y_train.csv")
    }

    pub fn y_test(&self) -> PathBuf {
        self.processed_dir.join("y_test.csv")
    }
}

/// Configuration for a training sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Root of the tracking store
    pub tracking_root: PathBuf,
    /// Where the fitted scaler is written
    pub scaler_path: PathBuf,
    /// Processed input tables
    pub data: DataPaths,
    /// Run configurations on the rayon pool
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            tracking_root: PathBuf::from("mlruns"),
            scaler_path: PathBuf::from("processors/scaler.json"),
            data: DataPaths::default(),
            parallel: true,
        }
    }
}

impl SweepConfig {
    pub fn tracking_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.tracking_root = root.into();
        self
    }

    pub fn scaler_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scaler_path = path.into();
        self
    }

    pub fn data(mut self, data: DataPaths) -> Self {
        self.data = data;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Resolve every relative path against `base`.
    pub fn rooted_at(self, base: &Path) -> Self {
        Self {
            tracking_root: base.join(self.tracking_root),
            scaler_path: base.join(self.scaler_path),
            data: DataPaths::new(base.join(self.data.processed_dir)),
            parallel: self.parallel,
        }
    }
}

/// Configuration for splitting a raw loans table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub input: PathBuf,
    pub output: DataPaths,
    /// Portion of rows held out for testing
    pub test_ratio: f64,
    pub seed: u64,
}

impl PrepareConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: DataPaths::default(),
            test_ratio: 0.2,
            seed: 42,
        }
    }

    pub fn output(mut self, output: DataPaths) -> Self {
        self.output = output;
        self
    }

    /// Clamped to `[0.05, 0.95]`.
    pub fn test_ratio(mut self, ratio: f64) -> Self {
        self.test_ratio = ratio.clamp(0.05, 0.95);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = SweepConfig::default();
        assert_eq!(config.tracking_root, PathBuf::from("mlruns"));
        assert_eq!(config.scaler_path, PathBuf::from("processors/scaler.json"));
        assert_eq!(config.data.x_train(), PathBuf::from("data/processed/X_train.csv"));
        assert!(config.parallel);
    }

    #[test]
    fn test_rooted_at() {
        let config = SweepConfig::default().parallel(false).rooted_at(Path::new("/w"));
        assert_eq!(config.tracking_root, PathBuf::from("/w/mlruns"));
        assert_eq!(config.data.y_test(), PathBuf::from("/w/data/processed/y_test.csv"));
        assert!(!config.parallel);
    }

    #[test]
    fn test_prepare_ratio_clamped() {
        let config = PrepareConfig::new("loans.csv").test_ratio(2.0);
        assert_eq!(config.test_ratio, 0.95);
        assert_eq!(config.seed, 42);
    }
}
