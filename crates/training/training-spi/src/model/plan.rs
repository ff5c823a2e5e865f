//! Sweep plans.

use classifier_spi::ModelKind;
use serde::{Deserialize, Serialize};

use super::HyperparameterGrid;
use crate::{Result, TrainingError};

/// Grid for one model family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyPlan {
    pub family: ModelKind,
    pub grid: HyperparameterGrid,
}

/// Families to sweep, in run order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    pub families: Vec<FamilyPlan>,
}

impl SweepPlan {
    pub fn new(families: Vec<FamilyPlan>) -> Self {
        Self { families }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let plan: SweepPlan =
            serde_json::from_str(text).map_err(|e| TrainingError::Plan(e.to_string()))?;
        if plan.families.is_empty() {
            return Err(TrainingError::Plan("no model families".to_string()));
        }
        Ok(plan)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TrainingError::Plan(e.to_string()))
    }

    pub fn total_configurations(&self) -> usize {
        self.families.iter().map(|f| f.grid.len()).sum()
    }
}

impl Default for SweepPlan {
    /// Three families, 3 + 4 + 4 configurations.
    fn default() -> Self {
        Self::new(vec![
            FamilyPlan {
                family: ModelKind::LogisticRegression,
                grid: HyperparameterGrid::new()
                    .with("solver", ["liblinear"])
                    .with("C", [0.1, 1.0, 10.0])
                    .with("random_state", [42i64]),
            },
            FamilyPlan {
                family: ModelKind::RandomForest,
                grid: HyperparameterGrid::new()
                    .with("n_estimators", [50i64, 100])
                    .with("max_depth", [5i64, 10])
                    .with("random_state", [42i64]),
            },
            FamilyPlan {
                family: ModelKind::GradientBoosting,
                grid: HyperparameterGrid::new()
                    .with("n_estimators", [50i64, 100])
                    .with("learning_rate", [0.05, 0.1])
                    .with("random_state", [42i64]),
            },
        ])
    }
}
