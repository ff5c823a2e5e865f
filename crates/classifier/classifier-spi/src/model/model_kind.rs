//! Model family kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClassifierError;

/// A model family. Each family owns one experiment in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelKind {
    LogisticRegression,
    RandomForest,
    GradientBoosting,
}

impl ModelKind {
    /// Every family, in sweep order.
    pub const ALL: [ModelKind; 3] = [
        ModelKind::LogisticRegression,
        ModelKind::RandomForest,
        ModelKind::GradientBoosting,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::LogisticRegression => "LogisticRegression",
            ModelKind::RandomForest => "RandomForest",
            ModelKind::GradientBoosting => "GradientBoosting",
        }
    }

    /// Ledger experiment name for this family.
    pub fn experiment_name(&self) -> String {
        format!("{}_Experiment", self.name())
    }

    /// Artifact sub-directory used when logging this family's model.
    pub fn artifact_dir(&self) -> String {
        format!("{}_model", self.name())
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModelKind {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', '-'], "").as_str() {
            "logisticregression" | "logreg" => Ok(ModelKind::LogisticRegression),
            "randomforest" | "rf" => Ok(ModelKind::RandomForest),
            "gradientboosting" | "gbm" | "lightgbm" => Ok(ModelKind::GradientBoosting),
            _ => Err(ClassifierError::invalid(
                "model",
                format!("unknown model family '{}'", s),
            )),
        }
    }
}
