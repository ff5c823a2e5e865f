//! Training Service Provider Interface
//!
//! Defines the types a hyperparameter sweep is described and reported in:
//!
//! - [`HyperparameterGrid`]: ordered candidate values per hyperparameter
//! - [`SweepPlan`]: one grid per model family
//! - [`SweepReport`]: one [`ConfigurationOutcome`] per grid point
//! - [`DataSource`]: where the train and test tables come from
//! - [`TrainingError`]: error type for training operations

pub mod contract;
pub mod error;
pub mod model;

pub use contract::DataSource;
pub use error::TrainingError;
pub use model::{
    ConfigurationOutcome, Dataset, FamilyPlan, HyperparameterGrid, OutcomeStatus, SweepPlan,
    SweepReport,
};

/// Result type for training operations.
pub type Result<T> = std::result::Result<T, TrainingError>;
