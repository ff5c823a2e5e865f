//! Training Facade
//!
//! High-level API for turning a raw loans table into recorded runs.
//! Re-exports all public types from the training stack.
//!
//! # Example
//!
//! ```rust,no_run
//! use training_facade::prelude::*;
//!
//! # fn main() -> training_facade::Result<()> {
//! prepare(&PrepareConfig::new("data/raw/loans.csv"))?;
//! let report = train(SweepConfig::default(), &SweepPlan::default())?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

// Re-export everything from core (which includes API and SPI)
pub use training_core::*;

// Explicit re-exports for documentation
pub use training_core::prelude;
