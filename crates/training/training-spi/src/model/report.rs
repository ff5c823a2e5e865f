//! Sweep outcomes.

use std::fmt;
use std::path::PathBuf;

use classifier_spi::{ClassificationMetrics, ModelKind};
use ledger_spi::Params;

/// How one configuration ended.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeStatus {
    Succeeded { metrics: ClassificationMetrics },
    Failed { reason: String },
}

/// Result of one grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationOutcome {
    pub family: ModelKind,
    pub params: Params,
    /// Ledger run id, absent only if the ledger write itself failed.
    pub run_id: Option<String>,
    pub status: OutcomeStatus,
}

impl ConfigurationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Succeeded { .. })
    }

    pub fn metrics(&self) -> Option<&ClassificationMetrics> {
        match &self.status {
            OutcomeStatus::Succeeded { metrics } => Some(metrics),
            OutcomeStatus::Failed { .. } => None,
        }
    }
}

/// Every configuration a sweep attempted, in plan order.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    pub outcomes: Vec<ConfigurationOutcome>,
    pub scaler_path: PathBuf,
}

impl SweepReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &ConfigurationOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ConfigurationOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} configurations: {} succeeded, {} failed",
            self.outcomes.len(),
            self.success_count(),
            self.failure_count()
        )?;
        for outcome in &self.outcomes {
            match &outcome.status {
                OutcomeStatus::Succeeded { metrics } => {
                    writeln!(f, "  ok   {} [{}] {}", outcome.family, outcome.params, metrics)?
                }
                OutcomeStatus::Failed { reason } => {
                    writeln!(f, "  FAIL {} [{}] {}", outcome.family, outcome.params, reason)?
                }
            }
        }
        Ok(())
    }
}
