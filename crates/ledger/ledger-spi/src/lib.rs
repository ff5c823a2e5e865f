//! Ledger Service Provider Interface
//!
//! Defines the append-only record of training runs:
//!
//! - [`TrackingStore`]: storage capability behind the ledger
//! - [`RunRecord`]: one immutable entry per trained configuration
//! - [`Experiment`]: runs grouped by model family
//! - [`LedgerError`]: error type for ledger operations

pub mod contract;
pub mod error;
pub mod model;

pub use contract::TrackingStore;
pub use error::LedgerError;
pub use model::{Experiment, ParamValue, Params, RunDraft, RunRecord, RunStatus};

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
