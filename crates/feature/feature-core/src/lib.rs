//! Feature Core
//!
//! Core implementations shared by training and serving:
//! - [`FeatureContract`]: the one transform from raw inputs to the vector
//! - [`StandardScaler`]: per-feature standardization, fit once and persisted

mod contract;
mod scaler;

pub use contract::FeatureContract;
pub use scaler::StandardScaler;

// Re-export SPI types
pub use feature_spi::{
    FeatureError, FeatureTransform, FeatureVector, RawInputs, Result, ScalerStep, EPSILON,
    FEATURE_COUNT, FEATURE_NAMES, RAW_FEATURE_COUNT, RAW_FEATURE_NAMES,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{FeatureContract, StandardScaler};
    pub use feature_spi::{
        FeatureError, FeatureTransform, FeatureVector, RawInputs, ScalerStep, FEATURE_NAMES,
        RAW_FEATURE_NAMES,
    };
}
