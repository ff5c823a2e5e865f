//! Best-run selection by a single metric.

use std::collections::BTreeSet;

use ledger_spi::{Experiment, RunRecord};
use registry_spi::{
    LeaderboardRow, RegistryError, Result, RunSelector, Selection, SelectionAnalysis,
    DEFAULT_METRIC,
};

/// Highest value of one metric wins
///
/// Only finished runs with a finite value for the metric take part. On a
/// tie the run that comes first in ledger order wins, so the result depends
/// only on the records and their sequence numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxMetricSelector {
    metric: String,
}

impl Default for MaxMetricSelector {
    fn default() -> Self {
        Self::new(DEFAULT_METRIC)
    }
}

impl MaxMetricSelector {
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
        }
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    fn score(&self, record: &RunRecord) -> Option<f64> {
        if !record.is_finished() {
            return None;
        }
        record.metric(&self.metric).filter(|v| v.is_finite())
    }

    /// Records in ledger order, so ties resolve the same way no matter how
    /// the caller ordered them.
    fn in_ledger_order<'a>(&self, records: &'a [RunRecord]) -> Vec<&'a RunRecord> {
        let mut ordered: Vec<&RunRecord> = records.iter().collect();
        ordered.sort_by_key(|r| r.sequence);
        ordered
    }

    /// Qualifying runs, best first. Equal values keep ledger order.
    pub fn leaderboard(&self, records: &[RunRecord]) -> Vec<LeaderboardRow> {
        let mut scored: Vec<(&RunRecord, f64)> = self
            .in_ledger_order(records)
            .into_iter()
            .filter_map(|r| self.score(r).map(|v| (r, v)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .enumerate()
            .map(|(i, (record, value))| LeaderboardRow {
                rank: i + 1,
                experiment_name: record.experiment_name.clone(),
                run_id: record.run_id.clone(),
                value,
                metrics: record.metrics.clone(),
            })
            .collect()
    }

    /// Run counts, metric names, leaderboard and the selection in one pass.
    pub fn analyze(&self, experiments: &[Experiment], records: &[RunRecord]) -> SelectionAnalysis {
        let runs_per_experiment = experiments
            .iter()
            .map(|e| {
                let count = records
                    .iter()
                    .filter(|r| r.experiment_id == e.experiment_id)
                    .count();
                (e.name.clone(), count)
            })
            .collect();
        let available_metrics: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.metrics.keys().cloned())
            .collect();

        SelectionAnalysis {
            metric: self.metric.clone(),
            runs_per_experiment,
            available_metrics: available_metrics.into_iter().collect(),
            leaderboard: self.leaderboard(records),
            selection: self.select(records).ok(),
        }
    }
}

impl RunSelector for MaxMetricSelector {
    fn select(&self, records: &[RunRecord]) -> Result<Selection> {
        let mut best: Option<(&RunRecord, f64)> = None;
        for record in self.in_ledger_order(records) {
            if let Some(value) = self.score(record) {
                if best.map_or(true, |(_, top)| value > top) {
                    best = Some((record, value));
                }
            }
        }

        let (record, value) = best.ok_or_else(|| RegistryError::NoCandidate {
            metric: self.metric.clone(),
        })?;
        tracing::debug!(run_id = %record.run_id, metric = %self.metric, value, "selected run");
        Ok(Selection {
            record: record.clone(),
            metric: self.metric.clone(),
            value,
        })
    }
}
