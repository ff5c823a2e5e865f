//! Scaler trait.

use crate::model::FeatureVector;
use crate::Result;

/// Numeric normalization fit once on the training table.
///
/// Adapted from a single-series pipeline step to row-major feature tables:
/// every column is normalized independently.
pub trait ScalerStep: Send + Sync {
    /// Learn per-feature parameters from the training rows.
    fn fit(&mut self, rows: &[FeatureVector]) -> Result<()>;

    /// Transform a single row.
    fn transform_row(&self, row: &FeatureVector) -> Result<FeatureVector>;

    /// Undo the transformation for a single row.
    fn inverse_transform_row(&self, row: &FeatureVector) -> Result<FeatureVector>;

    /// Whether [`ScalerStep::fit`] has completed.
    fn is_fitted(&self) -> bool;

    /// Name of this step.
    fn name(&self) -> &str;

    /// Transform a whole table.
    fn transform(&self, rows: &[FeatureVector]) -> Result<Vec<FeatureVector>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }
}
