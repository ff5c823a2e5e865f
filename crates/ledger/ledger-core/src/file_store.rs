//! mlruns-style tracking store on the local filesystem
//!
//! Layout under the root:
//!
//! ```text
//! <root>/<exp_id>/meta.json
//! <root>/<exp_id>/<run_id>/meta.json
//! <root>/<exp_id>/<run_id>/params.json
//! <root>/<exp_id>/<run_id>/metrics.json
//! <root>/<exp_id>/<run_id>/artifacts/...
//! ```
//!
//! Open runs are written under `<root>/<exp_id>/.staging/<run_id>` and
//! renamed into place by `end_run`, so a run directory that is visible to
//! readers is always complete.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use ledger_spi::{
    Experiment, LedgerError, Params, Result, RunDraft, RunRecord, RunStatus, TrackingStore,
};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::atomic::write_atomic;
use crate::util::{
    check_artifact_name, check_experiment_name, check_metrics, new_run_id, now_ms,
};

const META_FILE: &str = "meta.json";
const PARAMS_FILE: &str = "params.json";
const METRICS_FILE: &str = "metrics.json";
const ARTIFACTS_DIR: &str = "artifacts";
const STAGING_DIR: &str = ".staging";

/// Run fields stored in `<run>/meta.json`.
#[derive(Debug, Serialize, Deserialize)]
struct RunMeta {
    run_id: String,
    sequence: u64,
    experiment_id: String,
    experiment_name: String,
    artifact: Option<String>,
    status: RunStatus,
    failure_reason: Option<String>,
    start_time_ms: i64,
    end_time_ms: i64,
}

struct ActiveRun {
    draft: RunDraft,
    staging: PathBuf,
}

struct FileState {
    next_sequence: u64,
    next_experiment: u64,
    active: HashMap<String, ActiveRun>,
}

/// Tracking store backed by a directory tree of JSON files
pub struct FileTrackingStore {
    root: PathBuf,
    state: Mutex<FileState>,
}

impl FileTrackingStore {
    /// Open or create a store rooted at `root`. Sequence numbering resumes
    /// after the highest run already on disk.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| LedgerError::io(&root, e))?;
        Self::load(root)
    }

    /// Open a store that must already exist. Nothing is created on disk, so
    /// a mistyped root is an error instead of a new empty store.
    pub fn open_existing(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            let missing = std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "tracking root does not exist",
            );
            return Err(LedgerError::io(&root, missing));
        }
        Self::load(root)
    }

    fn load(root: PathBuf) -> Result<Self> {
        let store = Self {
            root,
            state: Mutex::new(FileState {
                next_sequence: 0,
                next_experiment: 1,
                active: HashMap::new(),
            }),
        };

        let experiments = store.read_experiments()?;
        let max_experiment = experiments
            .iter()
            .filter_map(|e| e.experiment_id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let max_sequence = store
            .read_runs(&experiments)?
            .iter()
            .map(|r| r.sequence)
            .max()
            .unwrap_or(0);
        {
            let mut state = store.state.lock();
            state.next_experiment = max_experiment + 1;
            state.next_sequence = max_sequence;
        }

        tracing::debug!(
            root = %store.root.display(),
            experiments = experiments.len(),
            last_sequence = max_sequence,
            "opened tracking store"
        );
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn experiment_dir(&self, experiment_id: &str) -> PathBuf {
        self.root.join(experiment_id)
    }

    fn read_experiments(&self) -> Result<Vec<Experiment>> {
        let mut experiments = Vec::new();
        for dir in list_dirs(&self.root)? {
            let meta = dir.join(META_FILE);
            if meta.is_file() {
                experiments.push(read_json::<Experiment>(&meta)?);
            }
        }
        experiments.sort_by_key(|e| {
            (
                e.experiment_id.parse::<u64>().unwrap_or(u64::MAX),
                e.experiment_id.clone(),
            )
        });
        Ok(experiments)
    }

    fn read_runs(&self, experiments: &[Experiment]) -> Result<Vec<RunRecord>> {
        let mut records = Vec::new();
        for experiment in experiments {
            for run_dir in list_dirs(&self.experiment_dir(&experiment.experiment_id))? {
                let meta_path = run_dir.join(META_FILE);
                if !meta_path.is_file() {
                    continue;
                }
                let meta: RunMeta = read_json(&meta_path)?;
                let params: Params = read_json_or_default(&run_dir.join(PARAMS_FILE))?;
                let metrics: BTreeMap<String, f64> =
                    read_json_or_default(&run_dir.join(METRICS_FILE))?;
                records.push(RunRecord {
                    run_id: meta.run_id,
                    sequence: meta.sequence,
                    experiment_id: meta.experiment_id,
                    experiment_name: meta.experiment_name,
                    params,
                    metrics,
                    artifact: meta.artifact,
                    status: meta.status,
                    failure_reason: meta.failure_reason,
                    start_time_ms: meta.start_time_ms,
                    end_time_ms: meta.end_time_ms,
                });
            }
        }
        records.sort_by_key(|r| r.sequence);
        Ok(records)
    }
}

impl TrackingStore for FileTrackingStore {
    fn set_experiment(&self, name: &str) -> Result<Experiment> {
        check_experiment_name(name)?;
        let mut state = self.state.lock();
        if let Some(existing) = self.read_experiments()?.into_iter().find(|e| e.name == name) {
            return Ok(existing);
        }

        // Another process may have taken the next id since open.
        let mut id = state.next_experiment;
        while self.experiment_dir(&id.to_string()).exists() {
            id += 1;
        }
        state.next_experiment = id + 1;

        let experiment_id = id.to_string();
        let dir = self.experiment_dir(&experiment_id);
        fs::create_dir_all(&dir).map_err(|e| LedgerError::io(&dir, e))?;
        let experiment = Experiment {
            experiment_id,
            name: name.to_string(),
            artifact_location: dir.display().to_string(),
            creation_time_ms: now_ms(),
        };
        write_json(&dir.join(META_FILE), &experiment)?;
        tracing::info!(
            experiment = %experiment.name,
            id = %experiment.experiment_id,
            "created experiment"
        );
        Ok(experiment)
    }

    fn list_experiments(&self) -> Result<Vec<Experiment>> {
        self.read_experiments()
    }

    fn start_run(&self, experiment_id: &str) -> Result<String> {
        let meta_path = self.experiment_dir(experiment_id).join(META_FILE);
        if !meta_path.is_file() {
            return Err(LedgerError::ExperimentNotFound(experiment_id.to_string()));
        }
        let experiment: Experiment = read_json(&meta_path)?;

        let run_id = new_run_id();
        let staging = self
            .experiment_dir(experiment_id)
            .join(STAGING_DIR)
            .join(&run_id);
        fs::create_dir_all(staging.join(ARTIFACTS_DIR))
            .map_err(|e| LedgerError::io(&staging, e))?;

        let draft = RunDraft {
            run_id: run_id.clone(),
            experiment_id: experiment.experiment_id,
            experiment_name: experiment.name,
            params: Params::new(),
            metrics: BTreeMap::new(),
            artifact: None,
            start_time_ms: now_ms(),
        };
        self.state
            .lock()
            .active
            .insert(run_id.clone(), ActiveRun { draft, staging });
        Ok(run_id)
    }

    fn log_params(&self, run_id: &str, params: &Params) -> Result<()> {
        let mut state = self.state.lock();
        let run = state
            .active
            .get_mut(run_id)
            .ok_or_else(|| LedgerError::RunNotFound(run_id.to_string()))?;
        run.draft.params.extend_from(params);
        write_json(&run.staging.join(PARAMS_FILE), &run.draft.params)
    }

    fn log_metrics(&self, run_id: &str, metrics: &BTreeMap<String, f64>) -> Result<()> {
        check_metrics(metrics)?;
        let mut state = self.state.lock();
        let run = state
            .active
            .get_mut(run_id)
            .ok_or_else(|| LedgerError::RunNotFound(run_id.to_string()))?;
        run.draft
            .metrics
            .extend(metrics.iter().map(|(k, v)| (k.clone(), *v)));
        write_json(&run.staging.join(METRICS_FILE), &run.draft.metrics)
    }

    fn log_artifact(&self, run_id: &str, name: &str, bytes: &[u8]) -> Result<String> {
        check_artifact_name(name)?;
        let mut state = self.state.lock();
        let run = state
            .active
            .get_mut(run_id)
            .ok_or_else(|| LedgerError::RunNotFound(run_id.to_string()))?;

        let path = run.staging.join(ARTIFACTS_DIR).join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LedgerError::io(parent, e))?;
        }
        fs::write(&path, bytes).map_err(|e| LedgerError::io(&path, e))?;

        let locator = format!(
            "{}/{}/{}/{}",
            run.draft.experiment_id, run_id, ARTIFACTS_DIR, name
        );
        run.draft.artifact = Some(locator.clone());
        Ok(locator)
    }

    fn end_run(
        &self,
        run_id: &str,
        status: RunStatus,
        failure_reason: Option<String>,
    ) -> Result<RunRecord> {
        let mut state = self.state.lock();
        let run = state
            .active
            .remove(run_id)
            .ok_or_else(|| LedgerError::RunNotFound(run_id.to_string()))?;

        let sequence = state.next_sequence + 1;
        let final_dir = self.experiment_dir(&run.draft.experiment_id).join(run_id);
        let record = run.draft.finish(sequence, status, failure_reason, now_ms());

        let meta = RunMeta {
            run_id: record.run_id.clone(),
            sequence,
            experiment_id: record.experiment_id.clone(),
            experiment_name: record.experiment_name.clone(),
            artifact: record.artifact.clone(),
            status,
            failure_reason: record.failure_reason.clone(),
            start_time_ms: record.start_time_ms,
            end_time_ms: record.end_time_ms,
        };
        let published = write_json(&run.staging.join(PARAMS_FILE), &record.params)
            .and_then(|_| write_json(&run.staging.join(METRICS_FILE), &record.metrics))
            .and_then(|_| write_json(&run.staging.join(META_FILE), &meta))
            .and_then(|_| {
                fs::rename(&run.staging, &final_dir).map_err(|e| LedgerError::io(&final_dir, e))
            });
        if let Err(e) = published {
            remove_staging(&run.staging);
            return Err(e);
        }

        state.next_sequence = sequence;
        tracing::debug!(run_id, sequence, status = ?status, "run recorded");
        Ok(record)
    }

    fn abort_run(&self, run_id: &str) -> Result<()> {
        let run = self
            .state
            .lock()
            .active
            .remove(run_id)
            .ok_or_else(|| LedgerError::RunNotFound(run_id.to_string()))?;
        remove_staging(&run.staging);
        tracing::debug!(run_id, "run discarded");
        Ok(())
    }

    fn search_runs(&self, experiment_ids: &[String]) -> Result<Vec<RunRecord>> {
        let experiments: Vec<Experiment> = self
            .read_experiments()?
            .into_iter()
            .filter(|e| experiment_ids.is_empty() || experiment_ids.contains(&e.experiment_id))
            .collect();
        self.read_runs(&experiments)
    }

    fn artifact_root(&self) -> Option<&Path> {
        Some(&self.root)
    }
}

fn remove_staging(staging: &Path) {
    match fs::remove_dir_all(staging) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %staging.display(),
            error = %e,
            "could not remove staged run"
        ),
    }
}

/// Subdirectories of `dir` whose names do not start with a dot. A missing
/// directory has none.
fn list_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(LedgerError::io(dir, e)),
    };
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LedgerError::io(dir, e))?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| LedgerError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| LedgerError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if path.is_file() {
        read_json(path)
    } else {
        Ok(T::default())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes =
        serde_json::to_vec_pretty(value).map_err(|e| LedgerError::Serialization(e.to_string()))?;
    write_atomic(path, &bytes).map(|_| ())
}
