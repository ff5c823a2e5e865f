//! The loaded model and scaler shared by every request.

use std::fs;
use std::path::{Path, PathBuf};

use classifier_core::Estimator;
use classifier_spi::{Classifier, ModelKind};
use feature_core::{FeatureContract, StandardScaler};
use feature_spi::{FeatureTransform, RawInputs, ScalerStep};
use registry_spi::ServingSlot;
use serde::Serialize;

use crate::error::ServingError;

/// Outcome of scoring one loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub class: u8,
    pub probability: f64,
}

impl Prediction {
    pub fn label(&self) -> &'static str {
        if self.class == 1 {
            "Will Default"
        } else {
            "Will Not Default"
        }
    }
}

/// Model and scaler loaded from the serving slot
///
/// Built once at start and never mutated; handlers share it through an
/// `Arc`.
#[derive(Debug, Clone)]
pub struct ReadyContext {
    model: Estimator,
    scaler: StandardScaler,
    contract: FeatureContract,
    model_path: PathBuf,
    scaler_path: PathBuf,
}

fn read(path: &Path) -> Result<Vec<u8>, ServingError> {
    fs::read(path).map_err(|e| ServingError::model_load(path, e))
}

impl ReadyContext {
    /// Load both files from `slot`. Any failure is a
    /// [`ServingError::ModelLoad`] naming the file.
    pub fn load(slot: &ServingSlot) -> Result<Self, ServingError> {
        let model = Estimator::from_json_bytes(&read(&slot.model_path)?)
            .map_err(|e| ServingError::model_load(&slot.model_path, e))?;
        let scaler = StandardScaler::from_json_bytes(&read(&slot.scaler_path)?)
            .map_err(|e| ServingError::model_load(&slot.scaler_path, e))?;
        tracing::info!(
            model = %model.kind(),
            model_path = %slot.model_path.display(),
            scaler_path = %slot.scaler_path.display(),
            "serving context ready"
        );
        Ok(Self {
            model,
            scaler,
            contract: FeatureContract::new(),
            model_path: slot.model_path.clone(),
            scaler_path: slot.scaler_path.clone(),
        })
    }

    /// Context over already-fitted parts.
    pub fn from_parts(model: Estimator, scaler: StandardScaler) -> Result<Self, ServingError> {
        if !model.is_fitted() {
            return Err(ServingError::model_load("<memory>", "model is not fitted"));
        }
        if !scaler.is_fitted() {
            return Err(ServingError::model_load("<memory>", "scaler is not fitted"));
        }
        Ok(Self {
            model,
            scaler,
            contract: FeatureContract::new(),
            model_path: PathBuf::from("<memory>"),
            scaler_path: PathBuf::from("<memory>"),
        })
    }

    pub fn model_kind(&self) -> ModelKind {
        self.model.kind()
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn scaler_path(&self) -> &Path {
        &self.scaler_path
    }

    /// Build, scale and predict for already-validated inputs.
    pub fn score(&self, inputs: &RawInputs) -> Result<Prediction, ServingError> {
        let row = self.contract.build(inputs);
        let scaled = self
            .scaler
            .transform_row(&row)
            .map_err(|e| ServingError::Prediction(e.to_string()))?;
        let probability = self
            .model
            .predict_proba_row(&scaled)
            .map_err(|e| ServingError::Prediction(e.to_string()))?;
        let class = self
            .model
            .predict_row(&scaled)
            .map_err(|e| ServingError::Prediction(e.to_string()))?;
        Ok(Prediction { class, probability })
    }

    /// Validate named string fields, then [`ReadyContext::score`].
    pub fn score_fields<'a, F>(&self, lookup: F) -> Result<Prediction, ServingError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let inputs = FeatureContract::parse_inputs(lookup)?;
        self.score(&inputs)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn inputs(fico: f64, income: f64) -> RawInputs {
        RawInputs {
            credit_lines_outstanding: 1.0,
            loan_amt_outstanding: 3200.0,
            total_debt_outstanding: 5500.0,
            income,
            years_employed: 3.0,
            fico_score: fico,
        }
    }

    #[test]
    fn test_load_and_score() {
        let tmp = tempfile::tempdir().unwrap();
        let ready = ReadyContext::load(&write_slot(tmp.path())).unwrap();
        assert_eq!(ready.model_kind(), ModelKind::LogisticRegression);
        assert_eq!(ready.score(&inputs(520.0, 55_000.0)).unwrap().label(), "Will Default");
        assert_eq!(
            ready.score(&inputs(690.0, 55_000.0)).unwrap().label(),
            "Will Not Default"
        );
    }

    #[test]
    fn test_missing_model_is_load_error() {
        let tmp = tempfile::tempdir().unwrap();
        let slot = write_slot(tmp.path());
        fs::remove_file(&slot.model_path).unwrap();
        match ReadyContext::load(&slot) {
            Err(ServingError::ModelLoad { path, .. }) => assert_eq!(path, slot.model_path),
            other => panic!("expected ModelLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_corrupt_scaler_is_load_error() {
        let tmp = tempfile::tempdir().unwrap();
        let slot = write_slot(tmp.path());
        fs::write(&slot.scaler_path, b"{\"mean\":").unwrap();
        match ReadyContext::load(&slot) {
            Err(ServingError::ModelLoad { path, .. }) => assert_eq!(path, slot.scaler_path),
            other => panic!("expected ModelLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_broken_tree_never_reaches_ready() {
        let tmp = tempfile::tempdir().unwrap();
        let slot = write_slot(tmp.path());
        let x = vec![[0.0; 8], [1.0; 8], [0.2; 8], [0.8; 8]];
        let mut forest = classifier_core::ModelConfig::default_for(ModelKind::RandomForest)
            .build()
            .unwrap();
        forest.fit(&x, &[0, 1, 0, 1]).unwrap();
        let mut json: serde_json::Value =
            serde_json::from_slice(&forest.to_json_bytes().unwrap()).unwrap();
        json["trees"][0]["nodes"] = serde_json::json!([]);
        fs::write(&slot.model_path, serde_json::to_vec(&json).unwrap()).unwrap();

        match ReadyContext::load(&slot) {
            Err(ServingError::ModelLoad { path, .. }) => assert_eq!(path, slot.model_path),
            other => panic!("expected ModelLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_income_scores() {
        let (model, scaler) = fitted_parts();
        let ready = ReadyContext::from_parts(model, scaler).unwrap();
        let prediction = ready.score(&inputs(650.0, 0.0)).unwrap();
        assert!(prediction.probability.is_finite());
    }

    #[test]
    fn test_score_fields_names_missing_field() {
        let (model, scaler) = fitted_parts();
        let ready = ReadyContext::from_parts(model, scaler).unwrap();
        let err = ready
            .score_fields(|name| (name != "fico_score").then_some("1"))
            .unwrap_err();
        assert!(err.to_string().contains("fico_score"));
    }
}
