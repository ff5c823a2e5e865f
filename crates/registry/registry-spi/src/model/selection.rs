//! Selection results.

use std::collections::BTreeMap;
use std::fmt;

use ledger_spi::RunRecord;
use serde::Serialize;

/// Metric used when none is given.
pub const DEFAULT_METRIC: &str = "accuracy";

/// The winning run and the value it won with.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub record: RunRecord,
    pub metric: String,
    pub value: f64,
}

impl Selection {
    /// Multi-line summary for operators.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Best run: {} ({})\n  {} = {:.4}\n  params: {}\n",
            self.record.run_id,
            self.record.experiment_name,
            self.metric,
            self.value,
            self.record.params
        );
        let metrics: Vec<String> = self
            .record
            .metrics
            .iter()
            .map(|(k, v)| format!("{}={:.4}", k, v))
            .collect();
        out.push_str(&format!("  metrics: {}", metrics.join(", ")));
        out
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// One qualifying run, ranked by the selection metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    /// 1-based.
    pub rank: usize,
    pub experiment_name: String,
    pub run_id: String,
    pub value: f64,
    pub metrics: BTreeMap<String, f64>,
}

/// Everything an operator sees before confirming a promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionAnalysis {
    pub metric: String,
    /// `(experiment name, run count)` in experiment order.
    pub runs_per_experiment: Vec<(String, usize)>,
    pub available_metrics: Vec<String>,
    pub leaderboard: Vec<LeaderboardRow>,
    /// `None` when no run qualifies.
    pub selection: Option<Selection>,
}

impl SelectionAnalysis {
    pub fn total_runs(&self) -> usize {
        self.runs_per_experiment.iter().map(|(_, n)| n).sum()
    }
}

impl fmt::Display for SelectionAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Runs: {}", self.total_runs())?;
        for (name, count) in &self.runs_per_experiment {
            writeln!(f, "  {:<32} {}", name, count)?;
        }
        writeln!(f, "Available metrics: {}", self.available_metrics.join(", "))?;
        writeln!(f, "Leaderboard by {}:", self.metric)?;

        let columns: Vec<&String> = self
            .leaderboard
            .iter()
            .flat_map(|row| row.metrics.keys())
            .fold(Vec::new(), |mut acc, key| {
                if !acc.contains(&key) {
                    acc.push(key);
                }
                acc
            });
        write!(f, "  {:<4} {:<32} {:<32}", "#", "experiment", "run_id")?;
        for column in &columns {
            write!(f, " {:>10}", column)?;
        }
        writeln!(f)?;
        for row in &self.leaderboard {
            write!(f, "  {:<4} {:<32} {:<32}", row.rank, row.experiment_name, row.run_id)?;
            for column in &columns {
                match row.metrics.get(*column) {
                    Some(v) => write!(f, " {:>10.4}", v)?,
                    None => write!(f, " {:>10}", "-")?,
                }
            }
            writeln!(f)?;
        }
        match &self.selection {
            Some(selection) => write!(f, "{}", selection),
            None => write!(f, "No run has a finite '{}' value", self.metric),
        }
    }
}
