//! Feature Service Provider Interface
//!
//! Defines the shared feature schema and the traits every feature
//! transformation must adhere to:
//!
//! - [`FeatureTransform`]: raw loan inputs to the ordered model vector
//! - [`ScalerStep`]: numeric normalization fit once and reused verbatim
//! - [`FeatureError`]: error type for feature operations
//!
//! The schema constants in [`model`] are the single definition of the
//! vector layout. Training-table construction and request handling both
//! read them from here.

pub mod contract;
pub mod error;
pub mod model;

pub use contract::{FeatureTransform, ScalerStep};
pub use error::FeatureError;
pub use model::{
    FeatureVector, RawInputs, EPSILON, FEATURE_COUNT, FEATURE_NAMES, RAW_FEATURE_COUNT,
    RAW_FEATURE_NAMES,
};

/// Result type for feature operations.
pub type Result<T> = std::result::Result<T, FeatureError>;
