//! Ids, clocks and name checks shared by the stores.

use std::collections::BTreeMap;

use ledger_spi::{LedgerError, Result};

pub(crate) fn new_run_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub(crate) fn check_experiment_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidName {
            name: name.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Artifact names are relative paths made of plain components.
pub(crate) fn check_artifact_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| LedgerError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name.starts_with('/') || name.contains('\\') {
        return Err(invalid("must be a relative path using '/'"));
    }
    if name
        .split('/')
        .any(|part| part.is_empty() || part == "." || part == "..")
    {
        return Err(invalid("contains an empty, '.' or '..' component"));
    }
    Ok(())
}

/// JSON has no NaN or infinity, so such values could never be read back.
pub(crate) fn check_metrics(metrics: &BTreeMap<String, f64>) -> Result<()> {
    match metrics.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(LedgerError::InvalidMetric {
            name: name.clone(),
            value: *value,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_unique_hex() {
        let a = new_run_id();
        let b = new_run_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_artifact_names() {
        assert!(check_artifact_name("model.json").is_ok());
        assert!(check_artifact_name("RandomForest_model/model.json").is_ok());
        assert!(check_artifact_name("../escape").is_err());
        assert!(check_artifact_name("/abs").is_err());
        assert!(check_artifact_name("a//b").is_err());
    }

    #[test]
    fn test_metrics_must_be_finite() {
        let mut metrics = BTreeMap::from([("accuracy".to_string(), 0.9)]);
        assert!(check_metrics(&metrics).is_ok());
        metrics.insert("f1_score".to_string(), f64::INFINITY);
        match check_metrics(&metrics) {
            Err(LedgerError::InvalidMetric { name, .. }) => assert_eq!(name, "f1_score"),
            other => panic!("expected InvalidMetric, got {:?}", other),
        }
    }

    #[test]
    fn test_experiment_names() {
        assert!(check_experiment_name("RandomForest_Experiment").is_ok());
        assert!(check_experiment_name("  ").is_err());
    }
}
