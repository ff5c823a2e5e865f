//! Hyperparameter sweep orchestrator

use classifier_core::metrics::evaluate;
use classifier_spi::{ClassificationMetrics, Classifier, ModelKind};
use feature_spi::{FeatureVector, ScalerStep};
use ledger_core::{ExperimentLedger, FileTrackingStore, RunSubmission};
use ledger_spi::Params;
use rayon::prelude::*;
use training_api::SweepConfig;
use training_spi::{
    ConfigurationOutcome, DataSource, Dataset, OutcomeStatus, Result, SweepPlan, SweepReport,
    TrainingError,
};

use crate::binding::bind_config;
use crate::data::CsvDataSource;
use crate::scaler_fit::fit_scaler;

/// One grid point of one family.
#[derive(Debug, Clone)]
struct Job {
    family: ModelKind,
    params: Params,
}

/// Both splits after scaling.
struct ScaledData<'a> {
    x_train: Vec<FeatureVector>,
    y_train: &'a [u8],
    x_test: Vec<FeatureVector>,
    y_test: &'a [u8],
}

/// Runs every configuration of a [`SweepPlan`] and records each one.
///
/// A configuration that fails is recorded as a failed run and the sweep
/// moves on. The returned report lists outcomes in plan order whether or
/// not the configurations ran in parallel.
pub struct SweepOrchestrator {
    ledger: ExperimentLedger,
    config: SweepConfig,
}

impl SweepOrchestrator {
    pub fn new(ledger: ExperimentLedger, config: SweepConfig) -> Self {
        Self { ledger, config }
    }

    /// Orchestrator over a [`FileTrackingStore`] at the configured root.
    pub fn open(config: SweepConfig) -> Result<Self> {
        let store = FileTrackingStore::open(&config.tracking_root)?;
        Ok(Self::new(ExperimentLedger::new(store), config))
    }

    pub fn ledger(&self) -> &ExperimentLedger {
        &self.ledger
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Fit the scaler on `X_train`, then run every configuration.
    pub fn run(&self, plan: &SweepPlan, dataset: &Dataset) -> Result<SweepReport> {
        if plan.families.is_empty() {
            return Err(TrainingError::Plan("no model families".to_string()));
        }
        dataset
            .check()
            .map_err(|reason| TrainingError::data(&self.config.data.processed_dir, reason))?;

        let scaler = fit_scaler(&dataset.x_train, &self.config.scaler_path)?;
        let scaled = ScaledData {
            x_train: scaler.transform(&dataset.x_train)?,
            y_train: &dataset.y_train,
            x_test: scaler.transform(&dataset.x_test)?,
            y_test: &dataset.y_test,
        };

        let jobs: Vec<Job> = plan
            .families
            .iter()
            .flat_map(|family_plan| {
                family_plan.grid.expand().into_iter().map(|params| Job {
                    family: family_plan.family,
                    params,
                })
            })
            .collect();
        tracing::info!(
            configurations = jobs.len(),
            parallel = self.config.parallel,
            "starting sweep"
        );

        let outcomes: Vec<ConfigurationOutcome> = if self.config.parallel {
            jobs.par_iter().map(|job| self.run_job(job, &scaled)).collect()
        } else {
            jobs.iter().map(|job| self.run_job(job, &scaled)).collect()
        };

        let report = SweepReport {
            outcomes,
            scaler_path: self.config.scaler_path.clone(),
        };
        tracing::info!(
            succeeded = report.success_count(),
            failed = report.failure_count(),
            "sweep finished"
        );
        Ok(report)
    }

    fn run_job(&self, job: &Job, data: &ScaledData<'_>) -> ConfigurationOutcome {
        let experiment = job.family.experiment_name();
        let (submission, status) = match fit_and_score(job, data) {
            Ok((metrics, artifact)) => {
                let submission = RunSubmission::finished(&experiment, job.params.clone())
                    .with_metrics(metrics.entries())
                    .with_artifact(format!("{}/model.json", job.family.artifact_dir()), artifact);
                (submission, OutcomeStatus::Succeeded { metrics })
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(
                    family = %job.family,
                    params = %job.params,
                    error = %reason,
                    "configuration failed"
                );
                let submission =
                    RunSubmission::failed(&experiment, job.params.clone(), reason.clone());
                (submission, OutcomeStatus::Failed { reason })
            }
        };

        match self.ledger.record(submission) {
            Ok(record) => {
                tracing::debug!(
                    run_id = %record.run_id,
                    sequence = record.sequence,
                    "run recorded"
                );
                ConfigurationOutcome {
                    family: job.family,
                    params: job.params.clone(),
                    run_id: Some(record.run_id),
                    status,
                }
            }
            Err(e) => {
                tracing::warn!(
                    family = %job.family,
                    params = %job.params,
                    error = %e,
                    "recording run failed"
                );
                ConfigurationOutcome {
                    family: job.family,
                    params: job.params.clone(),
                    run_id: None,
                    status: OutcomeStatus::Failed {
                        reason: format!("recording run failed: {}", e),
                    },
                }
            }
        }
    }
}

/// Bind, fit, evaluate and serialize one configuration.
fn fit_and_score(job: &Job, data: &ScaledData<'_>) -> Result<(ClassificationMetrics, Vec<u8>)> {
    let mut estimator = bind_config(job.family, &job.params)?.build()?;
    estimator.fit(&data.x_train, data.y_train)?;
    let predicted = estimator.predict(&data.x_test)?;
    let metrics = evaluate(data.y_test, &predicted)?;
    let artifact = estimator.to_json_bytes()?;
    Ok((metrics, artifact))
}

/// Load the processed tables named by `config` and sweep `plan` into a
/// file-backed ledger.
pub fn train(config: SweepConfig, plan: &SweepPlan) -> Result<SweepReport> {
    let dataset = CsvDataSource::new(config.data.clone()).load()?;
    SweepOrchestrator::open(config)?.run(plan, &dataset)
}
