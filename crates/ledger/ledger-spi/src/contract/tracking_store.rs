//! Tracking store trait.

use std::collections::BTreeMap;
use std::path::Path;

use crate::model::{Experiment, Params, RunRecord, RunStatus};
use crate::Result;

/// Storage capability behind the experiment ledger
///
/// A run is opened with [`start_run`](TrackingStore::start_run), filled with
/// params, metrics and artifacts, and becomes visible to
/// [`search_runs`](TrackingStore::search_runs) only after
/// [`end_run`](TrackingStore::end_run). Ending a run assigns its sequence
/// number and freezes it. [`abort_run`](TrackingStore::abort_run) drops an
/// open run without publishing anything.
pub trait TrackingStore: Send + Sync {
    /// Get or create the experiment with this name.
    fn set_experiment(&self, name: &str) -> Result<Experiment>;

    /// All experiments, in creation order.
    fn list_experiments(&self) -> Result<Vec<Experiment>>;

    /// Open a run in an experiment and return its id.
    fn start_run(&self, experiment_id: &str) -> Result<String>;

    /// Record hyperparameters. Later keys with the same name replace earlier ones.
    fn log_params(&self, run_id: &str, params: &Params) -> Result<()>;

    /// Record metric values. Non-finite values are rejected with
    /// [`LedgerError::InvalidMetric`](crate::LedgerError::InvalidMetric).
    fn log_metrics(&self, run_id: &str, metrics: &BTreeMap<String, f64>) -> Result<()>;

    /// Store artifact bytes under `name` and return the locator the run
    /// record will carry once ended.
    fn log_artifact(&self, run_id: &str, name: &str, bytes: &[u8]) -> Result<String>;

    /// Close a run and publish it.
    fn end_run(
        &self,
        run_id: &str,
        status: RunStatus,
        failure_reason: Option<String>,
    ) -> Result<RunRecord>;

    /// Discard an open run and everything logged to it.
    fn abort_run(&self, run_id: &str) -> Result<()>;

    /// Ended runs of the given experiments in sequence order. An empty
    /// slice searches every experiment.
    fn search_runs(&self, experiment_ids: &[String]) -> Result<Vec<RunRecord>>;

    /// Directory artifact locators are relative to, if the store is on disk.
    fn artifact_root(&self) -> Option<&Path> {
        None
    }
}
