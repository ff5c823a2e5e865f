//! Subcommand implementations over generic input and output streams.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use ledger_facade::{ExperimentLedger, FileTrackingStore};
use registry_facade::{
    Confirmation, MaxMetricSelector, ModelPromoter, PromotionReport, RegistryError, ServingSlot,
};
use training_facade::{prepare, train, PrepareConfig, SweepConfig, SweepPlan};

pub type CliResult<T> = std::result::Result<T, String>;

/// How `promote` ended when it did not fail.
#[derive(Debug)]
pub enum PromoteOutcome {
    Promoted(PromotionReport),
    Declined,
}

fn emit(out: &mut impl Write, text: impl std::fmt::Display) -> CliResult<()> {
    writeln!(out, "{}", text).map_err(|e| e.to_string())
}

/// Read-side commands never create the tracking root.
fn open_ledger(tracking_root: &Path) -> CliResult<ExperimentLedger> {
    FileTrackingStore::open_existing(tracking_root)
        .map(ExperimentLedger::new)
        .map_err(|e| e.to_string())
}

pub fn run_prepare(config: &PrepareConfig, out: &mut impl Write) -> CliResult<()> {
    let summary = prepare(config).map_err(|e| e.to_string())?;
    emit(
        out,
        format!(
            "Wrote {} train and {} test rows to {}",
            summary.train_rows,
            summary.test_rows,
            summary.output_dir.display()
        ),
    )
}

pub fn run_train(config: SweepConfig, plan: Option<&Path>, out: &mut impl Write) -> CliResult<()> {
    let plan = match plan {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read plan {}: {}", path.display(), e))?;
            SweepPlan::from_json(&text).map_err(|e| e.to_string())?
        }
        None => SweepPlan::default(),
    };
    let report = train(config, &plan).map_err(|e| e.to_string())?;
    emit(out, &report)?;
    emit(out, format!("Scaler written to {}", report.scaler_path.display()))
}

pub fn run_leaderboard(
    tracking_root: &Path,
    metric: &str,
    experiment: Option<&str>,
    out: &mut impl Write,
) -> CliResult<()> {
    let ledger = open_ledger(tracking_root)?;
    let mut experiments = ledger.experiments().map_err(|e| e.to_string())?;
    let mut records = ledger.query_all().map_err(|e| e.to_string())?;
    if let Some(name) = experiment {
        experiments.retain(|e| e.name == name);
        records.retain(|r| r.experiment_name == name);
    }
    let analysis = MaxMetricSelector::new(metric).analyze(&experiments, &records);
    emit(out, &analysis)
}

/// Print the analysis, ask for confirmation on `input`, and promote on yes.
///
/// No candidate and a missing artifact are errors; a declined prompt is not.
pub fn run_promote(
    tracking_root: &Path,
    metric: &str,
    slot: ServingSlot,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> CliResult<PromoteOutcome> {
    let ledger = open_ledger(tracking_root)?;
    let experiments = ledger.experiments().map_err(|e| e.to_string())?;
    let records = ledger.query_all().map_err(|e| e.to_string())?;
    let analysis = MaxMetricSelector::new(metric).analyze(&experiments, &records);
    emit(out, &analysis)?;

    let selection = analysis.selection.ok_or_else(|| {
        RegistryError::NoCandidate {
            metric: metric.to_string(),
        }
        .to_string()
    })?;

    write!(
        out,
        "\nPromote run {} to {}? (y/n): ",
        selection.record.run_id,
        slot.model_path.display()
    )
    .and_then(|_| out.flush())
    .map_err(|e| e.to_string())?;
    let mut answer = String::new();
    input.read_line(&mut answer).map_err(|e| e.to_string())?;

    let Some(confirmation) = Confirmation::from_answer(&answer) else {
        emit(out, "Model not promoted.")?;
        return Ok(PromoteOutcome::Declined);
    };

    let promoter = ModelPromoter::new(tracking_root, slot);
    let report = promoter
        .promote(&selection.record, confirmation)
        .map_err(|e| e.to_string())?;
    emit(
        out,
        format!(
            "Promoted {} ({} bytes) from {} to {}",
            report.run_id,
            report.bytes_copied,
            report.source.display(),
            report.destination.display()
        ),
    )?;
    Ok(PromoteOutcome::Promoted(report))
}
