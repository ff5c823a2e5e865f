use serde::{Deserialize, Serialize};

/// A named group of runs, one per model family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    pub experiment_id: String,
    pub name: String,
    /// Where this experiment's run artifacts live.
    pub artifact_location: String,
    pub creation_time_ms: i64,
}
