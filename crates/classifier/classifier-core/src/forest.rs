//! Random forest classifier
//!
//! Bagged CART trees grown in parallel with rayon. Tree `i` draws its
//! bootstrap sample and feature subsets from a generator seeded with
//! `random_state + i`, so a fixed `random_state` gives the same forest
//! regardless of thread scheduling. The class-1 probability is the mean
//! of the per-tree leaf frequencies.

use classifier_spi::{Classifier, ClassifierError, Result};
use feature_spi::{FeatureVector, FEATURE_COUNT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tree::{DecisionTree, TreeParams};
use crate::validation::check_training_set;

/// How many features each split may consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// `floor(sqrt(n_features))`
    #[default]
    Sqrt,
    /// `floor(log2(n_features))`
    Log2,
    All,
    Count(usize),
}

impl MaxFeatures {
    /// Resolved feature count for `n_features` inputs, at least 1.
    pub fn resolve(&self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().floor() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2().floor() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Count(k) => *k,
        };
        k.clamp(1, n_features.max(1))
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqrt" | "auto" => Ok(MaxFeatures::Sqrt),
            "log2" => Ok(MaxFeatures::Log2),
            "all" | "none" => Ok(MaxFeatures::All),
            other => other
                .parse::<usize>()
                .ok()
                .filter(|&k| k > 0)
                .map(MaxFeatures::Count)
                .ok_or_else(|| {
                    ClassifierError::invalid(
                        "max_features",
                        format!("unsupported value '{}'", other),
                    )
                }),
        }
    }
}

/// Hyperparameters for [`RandomForest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestConfig {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
    pub bootstrap: bool,
    pub random_state: Option<u64>,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
            random_state: None,
        }
    }
}

impl RandomForestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(ClassifierError::invalid("n_estimators", "must be at least 1"));
        }
        if self.max_depth == Some(0) {
            return Err(ClassifierError::invalid("max_depth", "must be at least 1"));
        }
        if self.min_samples_split < 2 {
            return Err(ClassifierError::invalid("min_samples_split", "must be at least 2"));
        }
        if self.min_samples_leaf == 0 {
            return Err(ClassifierError::invalid("min_samples_leaf", "must be at least 1"));
        }
        if let MaxFeatures::Count(0) = self.max_features {
            return Err(ClassifierError::invalid("max_features", "must be at least 1"));
        }
        Ok(())
    }

    fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
            max_features: Some(self.max_features.resolve(FEATURE_COUNT)),
        }
    }
}

/// Random forest classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: RandomForestConfig,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(config: RandomForestConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            trees: Vec::new(),
        })
    }

    pub fn config(&self) -> &RandomForestConfig {
        &self.config
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, features: &[FeatureVector], labels: &[u8]) -> Result<()> {
        check_training_set(features, labels)?;

        let targets: Vec<f64> = labels.iter().map(|&l| f64::from(l)).collect();
        let params = self.config.tree_params();
        let base_seed = self.config.random_state.unwrap_or_else(rand::random);
        let bootstrap = self.config.bootstrap;
        let n = features.len();

        let trees: Vec<DecisionTree> = (0..self.config.n_estimators)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
                let sample: Vec<usize> = if bootstrap {
                    (0..n).map(|_| rng.random_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                DecisionTree::fit(features, &targets, None, &sample, &params, &mut rng)
            })
            .collect();

        self.trees = trees;
        Ok(())
    }

    fn predict_proba_row(&self, row: &FeatureVector) -> Result<f64> {
        if self.trees.is_empty() {
            return Err(ClassifierError::NotFitted);
        }
        let total: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        Ok(total / self.trees.len() as f64)
    }

    fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Class 1 inside a band on feature 0, invisible to a linear model.
    fn band_data() -> (Vec<FeatureVector>, Vec<u8>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..60 {
            let v = i as f64 / 10.0;
            let mut row = [0.0; FEATURE_COUNT];
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = v + j as f64 * 0.01;
            }
            x.push(row);
            y.push(u8::from((2.0..4.0).contains(&v)));
        }
        (x, y)
    }

    fn config(seed: u64) -> RandomForestConfig {
        RandomForestConfig {
            n_estimators: 20,
            max_depth: Some(5),
            random_state: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_fits_band() {
        let (x, y) = band_data();
        let mut forest = RandomForest::new(config(42)).unwrap();
        forest.fit(&x, &y).unwrap();
        assert_eq!(forest.trees().len(), 20);

        let predicted = forest.predict(&x).unwrap();
        let correct = predicted.iter().zip(&y).filter(|(p, a)| p == a).count();
        assert!(correct as f64 / y.len() as f64 > 0.9);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (x, y) = band_data();
        let mut a = RandomForest::new(config(7)).unwrap();
        let mut b = RandomForest::new(config(7)).unwrap();
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a.trees(), b.trees());
    }

    #[test]
    fn test_single_class_allowed() {
        let (x, _) = band_data();
        let y = vec![0; x.len()];
        let mut forest = RandomForest::new(config(1)).unwrap();
        forest.fit(&x, &y).unwrap();
        assert_eq!(forest.predict_proba_row(&x[0]).unwrap(), 0.0);
    }

    #[test]
    fn test_probability_in_unit_interval() {
        let (x, y) = band_data();
        let mut forest = RandomForest::new(config(3)).unwrap();
        forest.fit(&x, &y).unwrap();
        for row in &x {
            let p = forest.predict_proba_row(row).unwrap();
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_max_features_resolve() {
        assert_eq!(MaxFeatures::Sqrt.resolve(8), 2);
        assert_eq!(MaxFeatures::Log2.resolve(8), 3);
        assert_eq!(MaxFeatures::All.resolve(8), 8);
        assert_eq!(MaxFeatures::Count(20).resolve(8), 8);
        assert_eq!(MaxFeatures::parse("4").unwrap(), MaxFeatures::Count(4));
        assert!(MaxFeatures::parse("half").is_err());
    }

    #[test]
    fn test_invalid_config() {
        let bad = RandomForestConfig {
            n_estimators: 0,
            ..Default::default()
        };
        assert!(RandomForest::new(bad).is_err());
        let bad_depth = RandomForestConfig {
            max_depth: Some(0),
            ..Default::default()
        };
        assert!(RandomForest::new(bad_depth).is_err());
    }

    #[test]
    fn test_unfitted() {
        let forest = RandomForest::new(RandomForestConfig::default()).unwrap();
        assert!(!forest.is_fitted());
        assert!(forest.predict_proba_row(&[0.0; FEATURE_COUNT]).is_err());
    }
}
