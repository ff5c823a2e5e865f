//! L2-regularized logistic regression
//!
//! Minimizes `0.5 * ||w||^2 + C * sum(log_loss)`. The intercept is not
//! penalized. Two solvers are available:
//!
//! - [`Solver::Newton`]: iteratively reweighted least squares, exact Newton
//!   steps on the full 9x9 system (8 coefficients plus intercept)
//! - [`Solver::GradientDescent`]: full-batch gradient descent on the same
//!   objective scaled by `1 / (C * n)`

use classifier_spi::{Classifier, ClassifierError, Result};
use feature_spi::{FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

use crate::linalg::solve;
use crate::validation::{check_training_set, require_both_classes, sigmoid};

/// Optimization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Solver {
    /// Newton-Raphson (IRLS).
    #[default]
    Newton,
    /// Full-batch gradient descent.
    GradientDescent,
}

impl Solver {
    pub fn name(&self) -> &'static str {
        match self {
            Solver::Newton => "newton",
            Solver::GradientDescent => "gradient_descent",
        }
    }

    /// Accepts the usual aliases. Every L2 solver name maps to Newton,
    /// which reaches the same optimum.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newton" | "newton-cg" | "lbfgs" | "liblinear" => Ok(Solver::Newton),
            "gradient_descent" | "gd" | "sgd" => Ok(Solver::GradientDescent),
            other => Err(ClassifierError::invalid(
                "solver",
                format!("unknown solver '{}'", other),
            )),
        }
    }
}

/// Hyperparameters for [`LogisticRegression`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionConfig {
    /// Inverse regularization strength.
    pub c: f64,
    pub solver: Solver,
    pub max_iter: usize,
    /// Convergence tolerance on the update norm.
    pub tol: f64,
    /// Recorded for reproducibility. Both solvers are deterministic.
    pub random_state: Option<u64>,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            solver: Solver::Newton,
            max_iter: 100,
            tol: 1e-6,
            random_state: None,
        }
    }
}

impl LogisticRegressionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.c > 0.0 && self.c.is_finite()) {
            return Err(ClassifierError::invalid("C", "must be a positive finite number"));
        }
        if self.max_iter == 0 {
            return Err(ClassifierError::invalid("max_iter", "must be at least 1"));
        }
        if !(self.tol > 0.0) {
            return Err(ClassifierError::invalid("tol", "must be positive"));
        }
        Ok(())
    }
}

/// Logistic regression classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    config: LogisticRegressionConfig,
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    n_iter: usize,
    fitted: bool,
}

impl LogisticRegression {
    /// Create an unfitted model. Fails on invalid hyperparameters.
    pub fn new(config: LogisticRegressionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            coefficients: [0.0; FEATURE_COUNT],
            intercept: 0.0,
            n_iter: 0,
            fitted: false,
        })
    }

    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }

    pub fn coefficients(&self) -> &[f64; FEATURE_COUNT] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Iterations used by the last fit.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    fn decision(&self, row: &FeatureVector) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }

    fn fit_newton(&mut self, features: &[FeatureVector], labels: &[u8]) -> Result<()> {
        let dim = FEATURE_COUNT + 1;
        let c = self.config.c;

        for iter in 0..self.config.max_iter {
            let mut gradient = vec![0.0; dim];
            let mut hessian = vec![vec![0.0; dim]; dim];

            for (row, &label) in features.iter().zip(labels) {
                let p = sigmoid(self.decision(row));
                let residual = p - f64::from(label);
                let weight = (p * (1.0 - p)).max(1e-12);

                for i in 0..FEATURE_COUNT {
                    gradient[i] += c * residual * row[i];
                    for j in 0..=i {
                        hessian[i][j] += c * weight * row[i] * row[j];
                    }
                    hessian[FEATURE_COUNT][i] += c * weight * row[i];
                }
                gradient[FEATURE_COUNT] += c * residual;
                hessian[FEATURE_COUNT][FEATURE_COUNT] += c * weight;
            }

            for i in 0..FEATURE_COUNT {
                gradient[i] += self.coefficients[i];
                hessian[i][i] += 1.0;
            }
            // Mirror the lower triangle.
            for i in 0..dim {
                for j in (i + 1)..dim {
                    hessian[i][j] = hessian[j][i];
                }
            }

            let step = solve(hessian, gradient)?;
            for i in 0..FEATURE_COUNT {
                self.coefficients[i] -= step[i];
            }
            self.intercept -= step[FEATURE_COUNT];
            self.n_iter = iter + 1;

            let norm = step.iter().map(|s| s * s).sum::<f64>().sqrt();
            if !norm.is_finite() {
                return Err(ClassifierError::NumericalError(
                    "Newton step diverged".to_string(),
                ));
            }
            if norm < self.config.tol {
                break;
            }
        }
        Ok(())
    }

    fn fit_gradient_descent(&mut self, features: &[FeatureVector], labels: &[u8]) -> Result<()> {
        let n = features.len() as f64;
        let penalty = 1.0 / (self.config.c * n);
        let learning_rate = 0.5;

        for iter in 0..self.config.max_iter {
            let mut grad_w = [0.0; FEATURE_COUNT];
            let mut grad_b = 0.0;

            for (row, &label) in features.iter().zip(labels) {
                let residual = sigmoid(self.decision(row)) - f64::from(label);
                for (g, x) in grad_w.iter_mut().zip(row.iter()) {
                    *g += residual * x / n;
                }
                grad_b += residual / n;
            }

            let mut norm = grad_b * grad_b;
            for (w, g) in self.coefficients.iter_mut().zip(grad_w.iter()) {
                let full = g + penalty * *w;
                *w -= learning_rate * full;
                norm += full * full;
            }
            self.intercept -= learning_rate * grad_b;
            self.n_iter = iter + 1;

            if !norm.is_finite() {
                return Err(ClassifierError::NumericalError(
                    "gradient descent diverged".to_string(),
                ));
            }
            if norm.sqrt() < self.config.tol {
                break;
            }
        }
        Ok(())
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            config: LogisticRegressionConfig::default(),
            coefficients: [0.0; FEATURE_COUNT],
            intercept: 0.0,
            n_iter: 0,
            fitted: false,
        }
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, features: &[FeatureVector], labels: &[u8]) -> Result<()> {
        check_training_set(features, labels)?;
        require_both_classes(labels)?;

        self.coefficients = [0.0; FEATURE_COUNT];
        self.intercept = 0.0;
        self.fitted = false;

        match self.config.solver {
            Solver::Newton => self.fit_newton(features, labels)?,
            Solver::GradientDescent => self.fit_gradient_descent(features, labels)?,
        }

        self.fitted = true;
        Ok(())
    }

    fn predict_proba_row(&self, row: &FeatureVector) -> Result<f64> {
        if !self.fitted {
            return Err(ClassifierError::NotFitted);
        }
        Ok(sigmoid(self.decision(row)))
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
