//! Closed set of model families
//!
//! [`Estimator`] is what gets persisted as a run artifact and loaded by the
//! server. The JSON form carries a `family` tag so a loaded artifact always
//! knows which predictor it holds.

use classifier_spi::{Classifier, ClassifierError, ModelKind, Result};
use feature_spi::FeatureVector;
use serde::{Deserialize, Serialize};

use crate::boosting::{GradientBoosting, GradientBoostingConfig};
use crate::forest::{RandomForest, RandomForestConfig};
use crate::logistic::{LogisticRegression, LogisticRegressionConfig};

/// Typed hyperparameters for one family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family")]
pub enum ModelConfig {
    LogisticRegression(LogisticRegressionConfig),
    RandomForest(RandomForestConfig),
    GradientBoosting(GradientBoostingConfig),
}

impl ModelConfig {
    /// Default hyperparameters for `kind`.
    pub fn default_for(kind: ModelKind) -> Self {
        match kind {
            ModelKind::LogisticRegression => {
                ModelConfig::LogisticRegression(LogisticRegressionConfig::default())
            }
            ModelKind::RandomForest => ModelConfig::RandomForest(RandomForestConfig::default()),
            ModelKind::GradientBoosting => {
                ModelConfig::GradientBoosting(GradientBoostingConfig::default())
            }
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            ModelConfig::LogisticRegression(_) => ModelKind::LogisticRegression,
            ModelConfig::RandomForest(_) => ModelKind::RandomForest,
            ModelConfig::GradientBoosting(_) => ModelKind::GradientBoosting,
        }
    }

    /// Validate and build an unfitted estimator.
    pub fn build(self) -> Result<Estimator> {
        Ok(match self {
            ModelConfig::LogisticRegression(c) => {
                Estimator::LogisticRegression(LogisticRegression::new(c)?)
            }
            ModelConfig::RandomForest(c) => Estimator::RandomForest(RandomForest::new(c)?),
            ModelConfig::GradientBoosting(c) => {
                Estimator::GradientBoosting(GradientBoosting::new(c)?)
            }
        })
    }
}

/// A model of one of the supported families
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "family")]
pub enum Estimator {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
    GradientBoosting(GradientBoosting),
}

impl Estimator {
    pub fn kind(&self) -> ModelKind {
        match self {
            Estimator::LogisticRegression(_) => ModelKind::LogisticRegression,
            Estimator::RandomForest(_) => ModelKind::RandomForest,
            Estimator::GradientBoosting(_) => ModelKind::GradientBoosting,
        }
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        if !self.is_fitted() {
            return Err(ClassifierError::NotFitted);
        }
        serde_json::to_vec_pretty(self).map_err(|e| ClassifierError::Serialization(e.to_string()))
    }

    /// Decode an artifact. Rejects unfitted models and any model that could
    /// not score a row, such as a tree with a dangling child index.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let estimator: Estimator = serde_json::from_slice(bytes)
            .map_err(|e| ClassifierError::Serialization(e.to_string()))?;
        if !estimator.is_fitted() {
            return Err(ClassifierError::Serialization(
                "artifact holds an unfitted model".to_string(),
            ));
        }
        estimator
            .check_structure()
            .map_err(ClassifierError::Serialization)?;
        Ok(estimator)
    }

    fn check_structure(&self) -> std::result::Result<(), String> {
        let trees = match self {
            Estimator::LogisticRegression(m) => {
                let finite = m.intercept().is_finite()
                    && m.coefficients().iter().all(|c| c.is_finite());
                return if finite {
                    Ok(())
                } else {
                    Err("artifact holds non-finite coefficients".to_string())
                };
            }
            Estimator::RandomForest(m) => m.trees(),
            Estimator::GradientBoosting(m) => {
                if !m.init_score().is_finite() {
                    return Err("artifact holds a non-finite initial score".to_string());
                }
                m.trees()
            }
        };
        match trees.iter().position(|t| !t.is_well_formed()) {
            Some(i) => Err(format!("artifact tree {} is malformed", i)),
            None => Ok(()),
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            Estimator::LogisticRegression(m) => m,
            Estimator::RandomForest(m) => m,
            Estimator::GradientBoosting(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Classifier {
        match self {
            Estimator::LogisticRegression(m) => m,
            Estimator::RandomForest(m) => m,
            Estimator::GradientBoosting(m) => m,
        }
    }
}

impl Classifier for Estimator {
    fn fit(&mut self, features: &[FeatureVector], labels: &[u8]) -> Result<()> {
        self.inner_mut().fit(features, labels)
    }

    fn predict_proba_row(&self, row: &FeatureVector) -> Result<f64> {
        self.inner().predict_proba_row(row)
    }

    fn is_fitted(&self) -> bool {
        self.inner().is_fitted()
    }
}
