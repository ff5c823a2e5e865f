//! Ledger data model.

mod experiment;
mod params;
mod run_record;

pub use experiment::Experiment;
pub use params::{ParamValue, Params};
pub use run_record::{RunDraft, RunRecord, RunStatus};
