//! Classifier Service Provider Interface
//!
//! Defines the capability every model family provides to the sweep and to
//! the serving path:
//!
//! - [`Classifier`]: fit on labelled feature rows, predict a class
//! - [`ModelKind`]: the closed set of model families
//! - [`ClassificationMetrics`]: the four metrics recorded per run
//! - [`ClassifierError`]: error type for all classifier operations

pub mod contract;
pub mod error;
pub mod model;

pub use contract::Classifier;
pub use error::ClassifierError;
pub use model::{ClassificationMetrics, ModelKind, METRIC_NAMES};

/// Result type for classifier operations.
pub type Result<T> = std::result::Result<T, ClassifierError>;
