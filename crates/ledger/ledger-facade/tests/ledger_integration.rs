//! Integration tests for the file-backed ledger

use ledger_facade::prelude::*;
use rayon::prelude::*;

fn lr_params(c: f64) -> Params {
    Params::new().with("C", c).with("random_state", 42i64)
}

#[test]
fn test_file_ledger_survives_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    {
        let ledger = ExperimentLedger::new(FileTrackingStore::open(tmp.path()).unwrap());
        for (c, acc) in [(0.1, 0.80), (1.0, 0.85), (10.0, 0.83)] {
            ledger
                .record(
                    RunSubmission::finished("LogisticRegression_Experiment", lr_params(c))
                        .with_metrics([("accuracy", acc)])
                        .with_artifact("LogisticRegression_model/model.json", b"{}".to_vec()),
                )
                .unwrap();
        }
    }

    let ledger = ExperimentLedger::new(FileTrackingStore::open(tmp.path()).unwrap());
    let all = ledger.query_all().unwrap();
    assert_eq!(all.len(), 3);
    for record in &all {
        assert_eq!(record.params.keys().collect::<Vec<_>>(), vec!["C", "random_state"]);
        let artifact = record.artifact.as_ref().unwrap();
        assert!(ledger.artifact_root().unwrap().join(artifact).is_file());
    }
    let cs: Vec<f64> = all
        .iter()
        .map(|r| r.params.get("C").unwrap().as_f64().unwrap())
        .collect();
    assert_eq!(cs, vec![0.1, 1.0, 10.0]);
}

#[test]
fn test_parallel_writers_get_unique_sequences() {
    let tmp = tempfile::tempdir().unwrap();
    let ledger = ExperimentLedger::new(FileTrackingStore::open(tmp.path()).unwrap());

    (0..24).into_par_iter().for_each(|i| {
        let family = ["A_Experiment", "B_Experiment", "C_Experiment"][i % 3];
        ledger
            .record(
                RunSubmission::finished(family, Params::new().with("i", i as i64))
                    .with_metrics([("accuracy", i as f64 / 24.0)]),
            )
            .unwrap();
    });

    let all = ledger.query_all().unwrap();
    assert_eq!(all.len(), 24);
    let sequences: Vec<u64> = all.iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, (1..=24).collect::<Vec<u64>>());
    assert_eq!(ledger.experiments().unwrap().len(), 3);

    let grouped = ledger.grouped().unwrap();
    assert!(grouped.iter().all(|(_, runs)| runs.len() == 8));
}

#[test]
fn test_failed_runs_are_recorded_with_reason() {
    let tmp = tempfile::tempdir().unwrap();
    let ledger = ExperimentLedger::new(FileTrackingStore::open(tmp.path()).unwrap());
    ledger
        .record(RunSubmission::failed(
            "GradientBoosting_Experiment",
            Params::new().with("learning_rate", 0.0),
            "Invalid parameter 'learning_rate': must be in (0, 1]",
        ))
        .unwrap();

    let all = ledger.query_all().unwrap();
    assert_eq!(all[0].status, RunStatus::Failed);
    assert!(all[0].metrics.is_empty());
    assert!(all[0].failure_reason.as_deref().unwrap().contains("learning_rate"));
}

#[test]
fn test_non_finite_metric_cannot_poison_queries() {
    let tmp = tempfile::tempdir().unwrap();
    let ledger = ExperimentLedger::new(FileTrackingStore::open(tmp.path()).unwrap());
    let good = ledger
        .record(
            RunSubmission::finished("LogisticRegression_Experiment", lr_params(1.0))
                .with_metrics([("accuracy", 0.9)]),
        )
        .unwrap();
    let err = ledger
        .record(
            RunSubmission::finished("LogisticRegression_Experiment", lr_params(10.0))
                .with_metrics([("accuracy", f64::NAN)]),
        )
        .unwrap_err();
    assert!(err.to_string().contains("accuracy"));

    assert_eq!(ledger.query_all().unwrap(), vec![good.clone()]);
    let reopened = ExperimentLedger::new(FileTrackingStore::open(tmp.path()).unwrap());
    assert_eq!(reopened.query_all().unwrap(), vec![good]);
}

#[test]
fn test_rejected_run_leaves_nothing_staged() {
    let tmp = tempfile::tempdir().unwrap();
    let ledger = ExperimentLedger::new(FileTrackingStore::open(tmp.path()).unwrap());
    let result = ledger.record(
        RunSubmission::finished("RandomForest_Experiment", lr_params(1.0))
            .with_metrics([("accuracy", 0.8)])
            .with_artifact("../outside.json", b"{}".to_vec()),
    );
    assert!(matches!(result, Err(LedgerError::InvalidName { .. })));

    let experiment = &ledger.experiments().unwrap()[0];
    let staging = tmp.path().join(&experiment.experiment_id).join(".staging");
    let staged = std::fs::read_dir(&staging).map(|d| d.count()).unwrap_or(0);
    assert_eq!(staged, 0);
    assert!(!tmp.path().join("outside.json").exists());
    assert!(ledger.query_all().unwrap().is_empty());
}
