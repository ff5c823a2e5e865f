//! Promotion results.

use std::collections::BTreeMap;
use std::path::PathBuf;

use ledger_spi::Params;
use serde::{Deserialize, Serialize};

/// Sidecar written next to the promoted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionMetadata {
    pub run_id: String,
    pub experiment_name: String,
    pub params: Params,
    pub metrics: BTreeMap<String, f64>,
    /// Artifact the model bytes were copied from.
    pub source: PathBuf,
}

/// What a promotion did.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionReport {
    pub run_id: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub metadata_path: PathBuf,
    pub bytes_copied: u64,
}
