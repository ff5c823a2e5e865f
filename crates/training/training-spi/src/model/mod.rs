//! Sweep data model.

mod dataset;
mod grid;
mod plan;
mod report;

pub use dataset::Dataset;
pub use grid::HyperparameterGrid;
pub use plan::{FamilyPlan, SweepPlan};
pub use report::{ConfigurationOutcome, OutcomeStatus, SweepReport};
