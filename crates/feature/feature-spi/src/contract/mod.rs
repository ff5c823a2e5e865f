//! Contract module containing feature traits.
//!
//! - [`FeatureTransform`] - Raw inputs to model vector
//! - [`ScalerStep`] - Fit-once numeric normalization

mod feature_transform;
mod scaler_step;

pub use feature_transform::FeatureTransform;
pub use scaler_step::ScalerStep;
