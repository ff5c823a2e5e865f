//! Error module containing feature error types.

mod feature_error;

pub use feature_error::FeatureError;
