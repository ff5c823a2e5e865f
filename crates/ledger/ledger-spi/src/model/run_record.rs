//! Run records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Params;

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Finished,
    Failed,
}

/// A run that has been started but not ended. Stores keep these private
/// until [`RunDraft::finish`] turns them into a [`RunRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunDraft {
    pub run_id: String,
    pub experiment_id: String,
    pub experiment_name: String,
    pub params: Params,
    pub metrics: BTreeMap<String, f64>,
    pub artifact: Option<String>,
    pub start_time_ms: i64,
}

impl RunDraft {
    pub fn finish(
        self,
        sequence: u64,
        status: RunStatus,
        failure_reason: Option<String>,
        end_time_ms: i64,
    ) -> RunRecord {
        RunRecord {
            run_id: self.run_id,
            sequence,
            experiment_id: self.experiment_id,
            experiment_name: self.experiment_name,
            params: self.params,
            metrics: self.metrics,
            artifact: self.artifact,
            status,
            failure_reason,
            start_time_ms: self.start_time_ms,
            end_time_ms,
        }
    }
}

/// One immutable ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: String,
    /// Position in the ledger, assigned when the run ended.
    pub sequence: u64,
    pub experiment_id: String,
    pub experiment_name: String,
    pub params: Params,
    pub metrics: BTreeMap<String, f64>,
    /// Artifact locator, relative to the store's artifact root.
    pub artifact: Option<String>,
    pub status: RunStatus,
    pub failure_reason: Option<String>,
    pub start_time_ms: i64,
    pub end_time_ms: i64,
}

impl RunRecord {
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.status == RunStatus::Finished
    }
}
