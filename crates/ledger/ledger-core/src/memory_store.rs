//! Process-local tracking store.

use std::collections::{BTreeMap, HashMap};

use ledger_spi::{
    Experiment, LedgerError, Params, Result, RunDraft, RunRecord, RunStatus, TrackingStore,
};
use parking_lot::Mutex;

use crate::util::{
    check_artifact_name, check_experiment_name, check_metrics, new_run_id, now_ms,
};

#[derive(Default)]
struct MemoryState {
    experiments: Vec<Experiment>,
    active: HashMap<String, RunDraft>,
    records: Vec<RunRecord>,
    artifacts: HashMap<String, Vec<u8>>,
    next_sequence: u64,
}

/// Tracking store held entirely in memory
///
/// Artifact locators have the form `memory://<run_id>/<name>` and can be
/// read back with [`InMemoryTrackingStore::artifact_bytes`].
#[derive(Default)]
pub struct InMemoryTrackingStore {
    state: Mutex<MemoryState>,
}

impl InMemoryTrackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifact_bytes(&self, locator: &str) -> Option<Vec<u8>> {
        self.state.lock().artifacts.get(locator).cloned()
    }

    /// Runs started but not yet ended.
    pub fn active_runs(&self) -> usize {
        self.state.lock().active.len()
    }
}

impl TrackingStore for InMemoryTrackingStore {
    fn set_experiment(&self, name: &str) -> Result<Experiment> {
        check_experiment_name(name)?;
        let mut state = self.state.lock();
        if let Some(existing) = state.experiments.iter().find(|e| e.name == name) {
            return Ok(existing.clone());
        }
        let id = (state.experiments.len() + 1).to_string();
        let experiment = Experiment {
            artifact_location: format!("memory://{}", id),
            experiment_id: id,
            name: name.to_string(),
            creation_time_ms: now_ms(),
        };
        state.experiments.push(experiment.clone());
        tracing::debug!(
            experiment = %experiment.name,
            id = %experiment.experiment_id,
            "created experiment"
        );
        Ok(experiment)
    }

    fn list_experiments(&self) -> Result<Vec<Experiment>> {
        Ok(self.state.lock().experiments.clone())
    }

    fn start_run(&self, experiment_id: &str) -> Result<String> {
        let mut state = self.state.lock();
        let experiment = state
            .experiments
            .iter()
            .find(|e| e.experiment_id == experiment_id)
            .cloned()
            .ok_or_else(|| LedgerError::ExperimentNotFound(experiment_id.to_string()))?;

        let run_id = new_run_id();
        state.active.insert(
            run_id.clone(),
            RunDraft {
                run_id: run_id.clone(),
                experiment_id: experiment.experiment_id,
                experiment_name: experiment.name,
                params: Params::new(),
                metrics: BTreeMap::new(),
                artifact: None,
                start_time_ms: now_ms(),
            },
        );
        Ok(run_id)
    }

    fn log_params(&self, run_id: &str, params: &Params) -> Result<()> {
        let mut state = self.state.lock();
        let draft = state
            .active
            .get_mut(run_id)
            .ok_or_else(|| LedgerError::RunNotFound(run_id.to_string()))?;
        draft.params.extend_from(params);
        Ok(())
    }

    fn log_metrics(&self, run_id: &str, metrics: &BTreeMap<String, f64>) -> Result<()> {
        check_metrics(metrics)?;
        let mut state = self.state.lock();
        let draft = state
            .active
            .get_mut(run_id)
            .ok_or_else(|| LedgerError::RunNotFound(run_id.to_string()))?;
        draft
            .metrics
            .extend(metrics.iter().map(|(k, v)| (k.clone(), *v)));
        Ok(())
    }

    fn log_artifact(&self, run_id: &str, name: &str, bytes: &[u8]) -> Result<String> {
        check_artifact_name(name)?;
        let mut state = self.state.lock();
        let locator = format!("memory://{}/{}", run_id, name);
        let draft = state
            .active
            .get_mut(run_id)
            .ok_or_else(|| LedgerError::RunNotFound(run_id.to_string()))?;
        draft.artifact = Some(locator.clone());
        state.artifacts.insert(locator.clone(), bytes.to_vec());
        Ok(locator)
    }

    fn end_run(
        &self,
        run_id: &str,
        status: RunStatus,
        failure_reason: Option<String>,
    ) -> Result<RunRecord> {
        let mut state = self.state.lock();
        let draft = state
            .active
            .remove(run_id)
            .ok_or_else(|| LedgerError::RunNotFound(run_id.to_string()))?;
        state.next_sequence += 1;
        let record = draft.finish(state.next_sequence, status, failure_reason, now_ms());
        state.records.push(record.clone());
        Ok(record)
    }

    fn abort_run(&self, run_id: &str) -> Result<()> {
        let mut state = self.state.lock();
        let draft = state
            .active
            .remove(run_id)
            .ok_or_else(|| LedgerError::RunNotFound(run_id.to_string()))?;
        if let Some(locator) = draft.artifact {
            state.artifacts.remove(&locator);
        }
        Ok(())
    }

    fn search_runs(&self, experiment_ids: &[String]) -> Result<Vec<RunRecord>> {
        let state = self.state.lock();
        Ok(state
            .records
            .iter()
            .filter(|r| experiment_ids.is_empty() || experiment_ids.contains(&r.experiment_id))
            .cloned()
            .collect())
    }
}
