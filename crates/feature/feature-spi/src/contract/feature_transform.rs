//! Raw-input to feature-vector transformation trait.

use crate::model::{FeatureVector, RawInputs};
use crate::Result;

/// Transformation from the raw loan inputs to the model-ready vector.
///
/// Implementations must be pure: the same inputs always produce a
/// bit-identical vector.
pub trait FeatureTransform: Send + Sync {
    /// Build the ordered feature vector for one example.
    fn build(&self, inputs: &RawInputs) -> FeatureVector;

    /// Parse and build from named string fields (form fields, CSV cells).
    ///
    /// Fails with [`crate::FeatureError::InputValidation`] naming the first
    /// missing or non-numeric field.
    fn build_from_fields<'a, F>(&self, lookup: F) -> Result<FeatureVector>
    where
        F: Fn(&str) -> Option<&'a str>;

    /// Names of the produced columns, in order.
    fn feature_names(&self) -> &'static [&'static str];
}
