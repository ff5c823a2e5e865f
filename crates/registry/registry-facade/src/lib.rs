//! Registry Facade
//!
//! High-level API for choosing the best run and deploying it. Re-exports
//! all public types from the registry stack for convenient usage.
//!
//! # Example
//!
//! ```rust,ignore
//! use registry_facade::prelude::*;
//!
//! let records = ledger.query_all()?;
//! let selection = MaxMetricSelector::new("accuracy").select(&records)?;
//! if let Some(confirmation) = Confirmation::from_answer(&answer) {
//!     let promoter = ModelPromoter::new("mlruns", ServingSlot::default());
//!     promoter.promote(&selection.record, confirmation)?;
//! }
//! ```

use ledger_spi::{Experiment, RunRecord};

// Re-export everything from core (which includes SPI)
pub use registry_core::*;

// Explicit re-exports for documentation
pub use registry_core::prelude;

/// Analysis over a ledger snapshot with the default selector for `metric`.
pub fn analyze(
    metric: &str,
    experiments: &[Experiment],
    records: &[RunRecord],
) -> SelectionAnalysis {
    MaxMetricSelector::new(metric).analyze(experiments, records)
}
