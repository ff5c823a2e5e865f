//! Feature Facade
//!
//! High-level API for the feature contract. Re-exports all public types
//! from the feature stack for convenient usage.
//!
//! # Example
//!
//! ```rust
//! use feature_facade::prelude::*;
//!
//! let fields = [("credit_lines_outstanding", "1"), ("loan_amt_outstanding", "4000"),
//!     ("total_debt_outstanding", "8000"), ("income", "50000"),
//!     ("years_employed", "3"), ("fico_score", "610")];
//! let lookup = |name: &str| fields.iter().find(|(n, _)| *n == name).map(|(_, v)| *v);
//! let vector = FeatureContract.build_from_fields(lookup).unwrap();
//! assert_eq!(vector.len(), 8);
//! ```

// Re-export everything from core (which includes SPI)
pub use feature_core::*;

// Explicit re-exports for documentation
pub use feature_core::prelude;
