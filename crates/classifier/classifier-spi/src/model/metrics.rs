//! Classification metrics.

use serde::{Deserialize, Serialize};

/// Names of the metrics recorded for every finished run.
pub const METRIC_NAMES: [&str; 4] = ["accuracy", "precision", "recall", "f1_score"];

/// Binary classification metrics, positive class `1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

impl ClassificationMetrics {
    /// `(name, value)` pairs in [`METRIC_NAMES`] order.
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            (METRIC_NAMES[0], self.accuracy),
            (METRIC_NAMES[1], self.precision),
            (METRIC_NAMES[2], self.recall),
            (METRIC_NAMES[3], self.f1_score),
        ]
    }

    /// Look up a metric by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }
}

impl std::fmt::Display for ClassificationMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "accuracy={:.4} precision={:.4} recall={:.4} f1_score={:.4}",
            self.accuracy, self.precision, self.recall, self.f1_score
        )
    }
}
