//! Classifier Core
//!
//! Model family implementations behind the [`Classifier`] capability:
//! - [`LogisticRegression`]: L2-regularized logistic regression
//! - [`RandomForest`]: bagged CART trees with feature subsampling
//! - [`GradientBoosting`]: gradient-boosted trees on binary log-loss
//! - [`Estimator`]: closed enum over the families, the persisted artifact
//! - [`metrics`]: accuracy, precision, recall and F1

mod boosting;
mod estimator;
mod forest;
mod linalg;
mod logistic;
pub mod metrics;
mod tree;
mod validation;

pub use boosting::{GradientBoosting, GradientBoostingConfig};
pub use estimator::{Estimator, ModelConfig};
pub use forest::{MaxFeatures, RandomForest, RandomForestConfig};
pub use logistic::{LogisticRegression, LogisticRegressionConfig, Solver};
pub use tree::{DecisionTree, TreeParams};

// Re-export SPI types
pub use classifier_spi::{
    ClassificationMetrics, Classifier, ClassifierError, ModelKind, Result, METRIC_NAMES,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::metrics::evaluate;
    pub use crate::{
        Estimator, GradientBoosting, GradientBoostingConfig, LogisticRegression,
        LogisticRegressionConfig, MaxFeatures, ModelConfig, RandomForest, RandomForestConfig,
        Solver,
    };
    pub use classifier_spi::{
        ClassificationMetrics, Classifier, ClassifierError, ModelKind, Result,
    };
}
