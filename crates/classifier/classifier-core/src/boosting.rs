//! Gradient-boosted trees on binary log-loss
//!
//! Starts from the log-odds of the positive rate, then adds one shallow
//! regression tree per round fitted to the residuals `y - p`. Leaf values
//! take a Newton step `sum(y - p) / sum(p * (1 - p))` and are shrunk by the
//! learning rate.

use classifier_spi::{Classifier, ClassifierError, Result};
use feature_spi::FeatureVector;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::tree::{DecisionTree, TreeParams};
use crate::validation::{check_training_set, require_both_classes, sigmoid};

/// Hyperparameters for [`GradientBoosting`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingConfig {
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    /// Fraction of rows drawn without replacement per round.
    pub subsample: f64,
    pub random_state: Option<u64>,
}

impl Default for GradientBoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            min_samples_leaf: 1,
            subsample: 1.0,
            random_state: None,
        }
    }
}

impl GradientBoostingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(ClassifierError::invalid("n_estimators", "must be at least 1"));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(ClassifierError::invalid("learning_rate", "must be in (0, 1]"));
        }
        if self.max_depth == 0 {
            return Err(ClassifierError::invalid("max_depth", "must be at least 1"));
        }
        if self.min_samples_leaf == 0 {
            return Err(ClassifierError::invalid("min_samples_leaf", "must be at least 1"));
        }
        if !(self.subsample > 0.0 && self.subsample <= 1.0) {
            return Err(ClassifierError::invalid("subsample", "must be in (0, 1]"));
        }
        Ok(())
    }
}

/// Gradient boosting classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoosting {
    config: GradientBoostingConfig,
    init_score: f64,
    trees: Vec<DecisionTree>,
}

impl GradientBoosting {
    pub fn new(config: GradientBoostingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            init_score: 0.0,
            trees: Vec::new(),
        })
    }

    pub fn config(&self) -> &GradientBoostingConfig {
        &self.config
    }

    pub fn init_score(&self) -> f64 {
        self.init_score
    }

    pub fn n_rounds(&self) -> usize {
        self.trees.len()
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    fn raw_score(&self, row: &FeatureVector) -> f64 {
        let lr = self.config.learning_rate;
        self.init_score + self.trees.iter().map(|t| lr * t.predict_row(row)).sum::<f64>()
    }
}

impl Classifier for GradientBoosting {
    fn fit(&mut self, features: &[FeatureVector], labels: &[u8]) -> Result<()> {
        check_training_set(features, labels)?;
        require_both_classes(labels)?;

        let n = features.len();
        let y: Vec<f64> = labels.iter().map(|&l| f64::from(l)).collect();
        let positive_rate = y.iter().sum::<f64>() / n as f64;
        let init_score = (positive_rate / (1.0 - positive_rate)).ln();

        let params = TreeParams {
            max_depth: Some(self.config.max_depth),
            min_samples_split: 2,
            min_samples_leaf: self.config.min_samples_leaf,
            max_features: None,
        };
        let mut rng = StdRng::seed_from_u64(self.config.random_state.unwrap_or_else(rand::random));
        let sample_size = ((n as f64 * self.config.subsample).round() as usize).clamp(1, n);
        let mut all_rows: Vec<usize> = (0..n).collect();

        let mut scores = vec![init_score; n];
        let mut trees = Vec::with_capacity(self.config.n_estimators);
        let lr = self.config.learning_rate;

        for _ in 0..self.config.n_estimators {
            let probs: Vec<f64> = scores.iter().map(|&s| sigmoid(s)).collect();
            let residuals: Vec<f64> = y.iter().zip(&probs).map(|(t, p)| t - p).collect();
            let hessians: Vec<f64> = probs.iter().map(|p| p * (1.0 - p)).collect();

            let sample: Vec<usize> = if sample_size < n {
                all_rows.shuffle(&mut rng);
                let mut picked = all_rows[..sample_size].to_vec();
                picked.sort_unstable();
                picked
            } else {
                all_rows.clone()
            };

            let tree = DecisionTree::fit(
                features,
                &residuals,
                Some(&hessians),
                &sample,
                &params,
                &mut rng,
            );
            for (score, row) in scores.iter_mut().zip(features) {
                *score += lr * tree.predict_row(row);
            }
            if scores.iter().any(|s| !s.is_finite()) {
                return Err(ClassifierError::NumericalError(
                    "boosting scores diverged".to_string(),
                ));
            }
            trees.push(tree);
        }

        self.init_score = init_score;
        self.trees = trees;
        Ok(())
    }

    fn predict_proba_row(&self, row: &FeatureVector) -> Result<f64> {
        if self.trees.is_empty() {
            return Err(ClassifierError::NotFitted);
        }
        Ok(sigmoid(self.raw_score(row)))
    }

    fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}
