//! Training-set checks shared by every family.

use classifier_spi::{ClassifierError, Result};
use feature_spi::FeatureVector;

/// Lengths agree, rows are finite and labels are binary.
pub(crate) fn check_training_set(features: &[FeatureVector], labels: &[u8]) -> Result<()> {
    if features.len() != labels.len() {
        return Err(ClassifierError::DimensionMismatch {
            rows: features.len(),
            labels: labels.len(),
        });
    }
    if features.is_empty() {
        return Err(ClassifierError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    if let Some(&bad) = labels.iter().find(|&&l| l > 1) {
        return Err(ClassifierError::InvalidLabel(bad));
    }
    if features.iter().flatten().any(|v| !v.is_finite()) {
        return Err(ClassifierError::NumericalError(
            "feature table contains non-finite values".to_string(),
        ));
    }
    Ok(())
}

/// Both classes must be present.
pub(crate) fn require_both_classes(labels: &[u8]) -> Result<()> {
    let positives = labels.iter().filter(|&&l| l == 1).count();
    if positives == 0 || positives == labels.len() {
        let only = if positives == 0 { 0 } else { 1 };
        return Err(ClassifierError::DegenerateLabels(format!(
            "needs samples of both classes, only class {} present",
            only
        )));
    }
    Ok(())
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
