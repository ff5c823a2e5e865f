//! Binary classifier trait.

use feature_spi::FeatureVector;

use crate::Result;

/// Common trait for all binary classifiers
///
/// Follows the fit-predict pattern. Labels are `0` (will not default) and
/// `1` (will default). Rows are expected to be scaled already.
///
/// # Example
///
/// ```rust,ignore
/// use classifier_spi::Classifier;
///
/// fn fit_and_score<C: Classifier>(
///     model: &mut C,
///     x: &[FeatureVector],
///     y: &[u8],
/// ) -> classifier_spi::Result<Vec<u8>> {
///     model.fit(x, y)?;
///     model.predict(x)
/// }
/// ```
pub trait Classifier {
    /// Fit the model to labelled rows.
    fn fit(&mut self, features: &[FeatureVector], labels: &[u8]) -> Result<()>;

    /// Probability of class `1` for one row.
    fn predict_proba_row(&self, row: &FeatureVector) -> Result<f64>;

    /// Whether the model has been fitted.
    fn is_fitted(&self) -> bool;

    /// Predicted class for one row.
    fn predict_row(&self, row: &FeatureVector) -> Result<u8> {
        Ok(u8::from(self.predict_proba_row(row)? > 0.5))
    }

    /// Predicted classes for a table.
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<u8>> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}
