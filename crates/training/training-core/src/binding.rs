//! Grid point to typed configuration.
//!
//! Each family accepts a fixed set of names. Anything else, or a value of
//! the wrong type, fails the configuration before an estimator is built.

use classifier_core::{
    GradientBoostingConfig, LogisticRegressionConfig, MaxFeatures, ModelConfig,
    RandomForestConfig, Solver,
};
use classifier_spi::ModelKind;
use ledger_spi::{ParamValue, Params};
use training_spi::{Result, TrainingError};

/// Start from the family defaults and apply every entry of `params`.
pub fn bind_config(family: ModelKind, params: &Params) -> Result<ModelConfig> {
    let binder = Binder { family };
    match family {
        ModelKind::LogisticRegression => {
            let mut config = LogisticRegressionConfig::default();
            for (name, value) in params.iter() {
                match name {
                    "C" => config.c = binder.float(name, value)?,
                    "solver" => config.solver = Solver::parse(binder.string(name, value)?)?,
                    "max_iter" => config.max_iter = binder.count(name, value)?,
                    "tol" => config.tol = binder.float(name, value)?,
                    "random_state" => config.random_state = Some(binder.seed(name, value)?),
                    _ => return Err(binder.unknown(name)),
                }
            }
            Ok(ModelConfig::LogisticRegression(config))
        }
        ModelKind::RandomForest => {
            let mut config = RandomForestConfig::default();
            for (name, value) in params.iter() {
                match name {
                    "n_estimators" => config.n_estimators = binder.count(name, value)?,
                    "max_depth" => config.max_depth = binder.optional_count(name, value)?,
                    "min_samples_split" => config.min_samples_split = binder.count(name, value)?,
                    "min_samples_leaf" => config.min_samples_leaf = binder.count(name, value)?,
                    "max_features" => config.max_features = binder.max_features(name, value)?,
                    "bootstrap" => config.bootstrap = binder.boolean(name, value)?,
                    "random_state" => config.random_state = Some(binder.seed(name, value)?),
                    _ => return Err(binder.unknown(name)),
                }
            }
            Ok(ModelConfig::RandomForest(config))
        }
        ModelKind::GradientBoosting => {
            let mut config = GradientBoostingConfig::default();
            for (name, value) in params.iter() {
                match name {
                    "n_estimators" => config.n_estimators = binder.count(name, value)?,
                    "learning_rate" => config.learning_rate = binder.float(name, value)?,
                    "max_depth" => config.max_depth = binder.count(name, value)?,
                    "min_samples_leaf" => config.min_samples_leaf = binder.count(name, value)?,
                    "subsample" => config.subsample = binder.float(name, value)?,
                    "random_state" => config.random_state = Some(binder.seed(name, value)?),
                    _ => return Err(binder.unknown(name)),
                }
            }
            Ok(ModelConfig::GradientBoosting(config))
        }
    }
}

struct Binder {
    family: ModelKind,
}

impl Binder {
    fn unknown(&self, name: &str) -> TrainingError {
        TrainingError::UnknownParameter {
            family: self.family,
            name: name.to_string(),
        }
    }

    fn mismatch(&self, name: &str, expected: &'static str, value: &ParamValue) -> TrainingError {
        TrainingError::ParameterType {
            family: self.family,
            name: name.to_string(),
            expected,
            actual: format!("{} {}", value.type_name(), value),
        }
    }

    fn float(&self, name: &str, value: &ParamValue) -> Result<f64> {
        value
            .as_f64()
            .ok_or_else(|| self.mismatch(name, "number", value))
    }

    fn count(&self, name: &str, value: &ParamValue) -> Result<usize> {
        value
            .as_i64()
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| self.mismatch(name, "non-negative integer", value))
    }

    fn seed(&self, name: &str, value: &ParamValue) -> Result<u64> {
        value
            .as_i64()
            .and_then(|v| u64::try_from(v).ok())
            .ok_or_else(|| self.mismatch(name, "non-negative integer", value))
    }

    fn boolean(&self, name: &str, value: &ParamValue) -> Result<bool> {
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(name, "boolean", value))
    }

    fn string<'v>(&self, name: &str, value: &'v ParamValue) -> Result<&'v str> {
        value
            .as_str()
            .ok_or_else(|| self.mismatch(name, "string", value))
    }

    /// Integer depth, or the string `"none"` for unlimited.
    fn optional_count(&self, name: &str, value: &ParamValue) -> Result<Option<usize>> {
        match value {
            ParamValue::Str(s) if s.eq_ignore_ascii_case("none") => Ok(None),
            _ => self
                .count(name, value)
                .map(Some)
                .map_err(|_| self.mismatch(name, "non-negative integer or \"none\"", value)),
        }
    }

    fn max_features(&self, name: &str, value: &ParamValue) -> Result<MaxFeatures> {
        match value {
            ParamValue::Str(s) => Ok(MaxFeatures::parse(s)?),
            ParamValue::Int(_) => Ok(MaxFeatures::Count(self.count(name, value)?)),
            _ => Err(self.mismatch(name, "string or integer", value)),
        }
    }
}
