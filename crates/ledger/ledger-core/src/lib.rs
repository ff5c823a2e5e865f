//! Ledger Core
//!
//! Tracking store implementations and the query surface over them:
//! - [`FileTrackingStore`]: mlruns-style directory tree of JSON documents
//! - [`InMemoryTrackingStore`]: process-local store for tests and dry runs
//! - [`ExperimentLedger`]: record and query runs across experiments
//! - [`write_atomic`]: temp file, fsync, rename

mod atomic;
mod file_store;
mod ledger;
mod memory_store;
mod util;

pub use atomic::write_atomic;
pub use file_store::FileTrackingStore;
pub use ledger::{ExperimentLedger, RunSubmission};
pub use memory_store::InMemoryTrackingStore;

// Re-export SPI types
pub use ledger_spi::{
    Experiment, LedgerError, ParamValue, Params, Result, RunDraft, RunRecord, RunStatus,
    TrackingStore,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        write_atomic, ExperimentLedger, FileTrackingStore, InMemoryTrackingStore, RunSubmission,
    };
    pub use ledger_spi::{
        Experiment, LedgerError, ParamValue, Params, RunRecord, RunStatus, TrackingStore,
    };
}
