//! Integration tests: ledger records through selection into the slot

use std::fs;

use classifier_facade::prelude::*;
use ledger_facade::prelude::*;
use registry_facade::prelude::*;
use registry_facade::PromotionMetadata;

fn model_bytes(positive_feature: usize) -> Vec<u8> {
    let x: Vec<[f64; 8]> = (0..20)
        .map(|i| {
            let mut row = [0.0; 8];
            row[positive_feature] = i as f64 - 9.5;
            row
        })
        .collect();
    let y: Vec<u8> = x.iter().map(|r| u8::from(r[positive_feature] > 0.0)).collect();
    let mut model = ModelConfig::default_for(ModelKind::LogisticRegression)
        .build()
        .unwrap();
    model.fit(&x, &y).unwrap();
    model.to_json_bytes().unwrap()
}

fn record(ledger: &ExperimentLedger, kind: ModelKind, accuracy: f64, feature: usize) -> RunRecord {
    ledger
        .record(
            RunSubmission::finished(
                kind.experiment_name(),
                Params::new().with("feature", feature as i64),
            )
            .with_metrics([("accuracy", accuracy), ("f1_score", accuracy - 0.1)])
            .with_artifact(
                format!("{}/model.json", kind.artifact_dir()),
                model_bytes(feature),
            ),
        )
        .unwrap()
}

#[test]
fn test_best_of_three_families_is_promoted() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("mlruns");
    let ledger = ExperimentLedger::new(FileTrackingStore::open(&root).unwrap());

    record(&ledger, ModelKind::LogisticRegression, 0.85, 0);
    let winner = record(&ledger, ModelKind::RandomForest, 0.92, 1);
    record(&ledger, ModelKind::GradientBoosting, 0.90, 2);

    let records = ledger.query_all().unwrap();
    let analysis = registry_facade::analyze("accuracy", &ledger.experiments().unwrap(), &records);
    assert_eq!(analysis.total_runs(), 3);
    assert_eq!(analysis.leaderboard[0].run_id, winner.run_id);
    let selection = analysis.selection.clone().unwrap();
    assert_eq!(selection.record.run_id, winner.run_id);
    assert_eq!(selection.value, 0.92);

    let slot = ServingSlot::default().rooted_at(tmp.path());
    let promoter = ModelPromoter::new(&root, slot.clone());
    let report = promoter
        .promote(&selection.record, Confirmation::from_answer("Y").unwrap())
        .unwrap();

    assert!(report.source.ends_with("artifacts/RandomForest_model/model.json"));
    let promoted = Estimator::from_json_bytes(&fs::read(&slot.model_path).unwrap()).unwrap();
    let mut row = [0.0; 8];
    row[1] = 5.0;
    assert_eq!(promoted.predict_row(&row).unwrap(), 1);
}

#[test]
fn test_declined_answer_yields_no_confirmation() {
    assert!(Confirmation::from_answer("n").is_none());
    assert!(Confirmation::from_answer("").is_none());
}

#[test]
fn test_empty_ledger_has_no_candidate() {
    let ledger = ExperimentLedger::new(InMemoryTrackingStore::new());
    let records = ledger.query_all().unwrap();
    assert!(matches!(
        MaxMetricSelector::default().select(&records),
        Err(RegistryError::NoCandidate { .. })
    ));
    let analysis = registry_facade::analyze("accuracy", &[], &records);
    assert!(analysis.selection.is_none());
    assert!(analysis.leaderboard.is_empty());
}

#[test]
fn test_second_promotion_overwrites_first() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("mlruns");
    let ledger = ExperimentLedger::new(FileTrackingStore::open(&root).unwrap());
    let first = record(&ledger, ModelKind::LogisticRegression, 0.8, 0);
    let second = record(&ledger, ModelKind::GradientBoosting, 0.9, 3);

    let slot = ServingSlot::default().rooted_at(tmp.path());
    let promoter = ModelPromoter::new(&root, slot.clone());
    let yes = || Confirmation::from_answer("yes").unwrap();
    promoter.promote(&first, yes()).unwrap();
    promoter.promote(&second, yes()).unwrap();

    let metadata: PromotionMetadata =
        serde_json::from_slice(&fs::read(slot.metadata_path()).unwrap()).unwrap();
    assert_eq!(metadata.run_id, second.run_id);
    assert_eq!(metadata.experiment_name, "GradientBoosting_Experiment");
}
