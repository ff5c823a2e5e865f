//! Training Core
//!
//! Implementations behind `credit-default prepare` and `credit-default train`:
//! - [`prepare`]: raw loans table to the four processed tables
//! - [`CsvDataSource`]: reads processed tables with header checks
//! - [`fit_scaler`]: fit once on `X_train` and persist atomically
//! - [`bind_config`]: grid point to a typed family configuration
//! - [`SweepOrchestrator`]: every family, every grid point, one run each

mod binding;
mod data;
mod scaler_fit;
mod sweep;

pub use binding::bind_config;
pub use data::{
    prepare, read_feature_table, read_labels, write_feature_table, write_labels, CsvDataSource,
    PrepareSummary,
};
pub use scaler_fit::fit_scaler;
pub use sweep::{train, SweepOrchestrator};

// Re-export API types (which include SPI)
pub use training_api::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{bind_config, fit_scaler, prepare, train, CsvDataSource, SweepOrchestrator};
    pub use training_api::{
        ConfigurationOutcome, DataPaths, DataSource, Dataset, FamilyPlan, HyperparameterGrid,
        OutcomeStatus, PrepareConfig, SweepConfig, SweepPlan, SweepReport, TrainingError,
    };
}
