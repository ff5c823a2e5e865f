//! Model module containing classifier data structures.
//!
//! - [`ModelKind`] - The closed set of model families
//! - [`ClassificationMetrics`] - Per-run evaluation metrics

mod metrics;
mod model_kind;

pub use metrics::{ClassificationMetrics, METRIC_NAMES};
pub use model_kind::ModelKind;
