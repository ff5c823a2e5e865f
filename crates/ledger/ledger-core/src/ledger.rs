//! Query surface over a tracking store.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use ledger_spi::{Experiment, Params, Result, RunRecord, RunStatus, TrackingStore};

/// Everything needed to write one run in a single call.
#[derive(Debug, Clone)]
pub struct RunSubmission {
    pub experiment_name: String,
    pub params: Params,
    pub metrics: BTreeMap<String, f64>,
    /// `(name, bytes)` stored under the run's artifact directory.
    pub artifact: Option<(String, Vec<u8>)>,
    pub status: RunStatus,
    pub failure_reason: Option<String>,
}

impl RunSubmission {
    pub fn finished(experiment_name: impl Into<String>, params: Params) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            params,
            metrics: BTreeMap::new(),
            artifact: None,
            status: RunStatus::Finished,
            failure_reason: None,
        }
    }

    pub fn failed(
        experiment_name: impl Into<String>,
        params: Params,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            status: RunStatus::Failed,
            failure_reason: Some(reason.into()),
            ..Self::finished(experiment_name, params)
        }
    }

    pub fn with_metrics<'a>(mut self, metrics: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        self.metrics
            .extend(metrics.into_iter().map(|(k, v)| (k.to_string(), v)));
        self
    }

    pub fn with_artifact(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.artifact = Some((name.into(), bytes));
        self
    }
}

/// Append-only experiment ledger
///
/// Cloning is cheap and shares the underlying store, so one ledger can be
/// handed to every sweep worker.
#[derive(Clone)]
pub struct ExperimentLedger {
    store: Arc<dyn TrackingStore>,
}

impl ExperimentLedger {
    pub fn new(store: impl TrackingStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_arc(store: Arc<dyn TrackingStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn TrackingStore {
        self.store.as_ref()
    }

    pub fn artifact_root(&self) -> Option<&Path> {
        self.store.artifact_root()
    }

    /// Write one run and return the published record. If any part of the
    /// run cannot be written, the run is discarded and nothing is published.
    pub fn record(&self, submission: RunSubmission) -> Result<RunRecord> {
        let experiment = self.store.set_experiment(&submission.experiment_name)?;
        let run_id = self.store.start_run(&experiment.experiment_id)?;
        if let Err(e) = self.fill(&run_id, &submission) {
            if let Err(abort) = self.store.abort_run(&run_id) {
                tracing::warn!(run_id = %run_id, error = %abort, "discarding run failed");
            }
            return Err(e);
        }
        self.store
            .end_run(&run_id, submission.status, submission.failure_reason)
    }

    fn fill(&self, run_id: &str, submission: &RunSubmission) -> Result<()> {
        self.store.log_params(run_id, &submission.params)?;
        if !submission.metrics.is_empty() {
            self.store.log_metrics(run_id, &submission.metrics)?;
        }
        if let Some((name, bytes)) = &submission.artifact {
            self.store.log_artifact(run_id, name, bytes)?;
        }
        Ok(())
    }

    /// Every run across every experiment, in sequence order.
    pub fn query_all(&self) -> Result<Vec<RunRecord>> {
        self.store.search_runs(&[])
    }

    pub fn query_by_experiment(&self, experiment_id: &str) -> Result<Vec<RunRecord>> {
        self.store.search_runs(&[experiment_id.to_string()])
    }

    /// Runs of the experiment with this name. Unknown names yield nothing.
    pub fn query_by_experiment_name(&self, name: &str) -> Result<Vec<RunRecord>> {
        match self.experiments()?.into_iter().find(|e| e.name == name) {
            Some(experiment) => self.query_by_experiment(&experiment.experiment_id),
            None => Ok(Vec::new()),
        }
    }

    pub fn experiments(&self) -> Result<Vec<Experiment>> {
        self.store.list_experiments()
    }

    /// Experiments paired with their runs, both in ledger order.
    pub fn grouped(&self) -> Result<Vec<(Experiment, Vec<RunRecord>)>> {
        let mut records = self.query_all()?;
        let mut groups = Vec::new();
        for experiment in self.experiments()? {
            let (mine, rest): (Vec<RunRecord>, Vec<RunRecord>) = records
                .into_iter()
                .partition(|r| r.experiment_id == experiment.experiment_id);
            records = rest;
            groups.push((experiment, mine));
        }
        Ok(groups)
    }

    /// Union of metric names over all runs.
    pub fn available_metrics(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .query_all()?
            .iter()
            .flat_map(|r| r.metrics.keys().cloned())
            .collect())
    }

    /// `(run_id, value)` for every run in ledger order.
    pub fn metric_values(&self, name: &str) -> Result<Vec<(String, Option<f64>)>> {
        Ok(self
            .query_all()?
            .into_iter()
            .map(|r| {
                let value = r.metric(name);
                (r.run_id, value)
            })
            .collect())
    }
}
