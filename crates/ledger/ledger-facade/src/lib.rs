//! Ledger Facade
//!
//! High-level API for recording and querying training runs. Re-exports
//! all public types from the ledger stack for convenient usage.
//!
//! # Example
//!
//! ```rust
//! use ledger_facade::prelude::*;
//!
//! let ledger = ExperimentLedger::new(InMemoryTrackingStore::new());
//! let record = ledger
//!     .record(
//!         RunSubmission::finished(
//!             "RandomForest_Experiment",
//!             Params::new().with("max_depth", 5i64),
//!         )
//!         .with_metrics([("accuracy", 0.92)]),
//!     )
//!     .unwrap();
//! assert_eq!(ledger.query_all().unwrap(), vec![record]);
//! ```

// Re-export everything from core (which includes SPI)
pub use ledger_core::*;

// Explicit re-exports for documentation
pub use ledger_core::prelude;
