//! Registry Service Provider Interface
//!
//! Defines how a finished run is chosen and deployed:
//!
//! - [`RunSelector`]: best-run selection policy over ledger records
//! - [`ServingSlot`]: fixed model and scaler locations the server loads
//! - [`Confirmation`]: operator consent, required to promote
//! - [`RegistryError`]: error type for selection and promotion

pub mod contract;
pub mod error;
pub mod model;

pub use contract::RunSelector;
pub use error::RegistryError;
pub use model::{
    Confirmation, LeaderboardRow, PromotionMetadata, PromotionReport, Selection,
    SelectionAnalysis, ServingSlot, DEFAULT_METRIC,
};

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
