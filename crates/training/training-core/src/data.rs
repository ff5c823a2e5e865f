//! Processed tables on disk and the raw-table split that produces them.

use std::fs;
use std::path::{Path, PathBuf};

use feature_core::FeatureContract;
use feature_spi::{FeatureTransform, FeatureVector, FEATURE_COUNT, FEATURE_NAMES, RAW_FEATURE_NAMES};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use training_api::{DataPaths, PrepareConfig, LABEL_COLUMN};
use training_spi::{DataSource, Dataset, Result, TrainingError};

/// Reads `X_train.csv`, `X_test.csv`, `y_train.csv` and `y_test.csv`.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    paths: DataPaths,
}

impl CsvDataSource {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }
}

impl DataSource for CsvDataSource {
    fn load(&self) -> Result<Dataset> {
        let dataset = Dataset {
            x_train: read_feature_table(&self.paths.x_train())?,
            y_train: read_labels(&self.paths.y_train())?,
            x_test: read_feature_table(&self.paths.x_test())?,
            y_test: read_labels(&self.paths.y_test())?,
        };
        dataset
            .check()
            .map_err(|reason| TrainingError::data(&self.paths.processed_dir, reason))?;
        tracing::info!(
            train_rows = dataset.x_train.len(),
            test_rows = dataset.x_test.len(),
            dir = %self.paths.processed_dir.display(),
            "loaded processed tables"
        );
        Ok(dataset)
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<fs::File>> {
    let file = fs::File::open(path).map_err(|e| TrainingError::io(path, e))?;
    Ok(csv::Reader::from_reader(file))
}

fn csv_error(path: &Path, e: csv::Error) -> TrainingError {
    TrainingError::data(path, e.to_string())
}

/// Feature table whose header must be exactly the contract's column order.
pub fn read_feature_table(path: &Path) -> Result<Vec<FeatureVector>> {
    let mut reader = open_reader(path)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    FeatureContract::validate_header(&headers)
        .map_err(|e| TrainingError::data(path, e.to_string()))?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let mut row = [0.0; FEATURE_COUNT];
        for (i, (slot, name)) in row.iter_mut().zip(FEATURE_NAMES.iter()).enumerate() {
            *slot = FeatureContract::parse_field(name, record.get(i))
                .map_err(|e| TrainingError::data(path, format!("row {}: {}", line + 1, e)))?;
        }
        rows.push(row);
    }
    Ok(rows)
}

fn parse_label(raw: &str) -> Option<u8> {
    match raw.trim() {
        "0" => Some(0),
        "1" => Some(1),
        other => match other.parse::<f64>() {
            Ok(v) if v == 0.0 => Some(0),
            Ok(v) if v == 1.0 => Some(1),
            _ => None,
        },
    }
}

/// Single-column label table headed `default`.
pub fn read_labels(path: &Path) -> Result<Vec<u8>> {
    let mut reader = open_reader(path)?;
    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    if headers.len() != 1 || headers.get(0).map(str::trim) != Some(LABEL_COLUMN) {
        return Err(TrainingError::data(
            path,
            format!("expected a single '{}' column", LABEL_COLUMN),
        ));
    }

    let mut labels = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let raw = record.get(0).unwrap_or("");
        let label = parse_label(raw).ok_or_else(|| {
            TrainingError::data(path, format!("row {}: label '{}' is not 0 or 1", line + 1, raw))
        })?;
        labels.push(label);
    }
    Ok(labels)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| TrainingError::io(parent, e))?;
        }
    }
    Ok(())
}

/// Floats are written in shortest round-trip form, so reading the table
/// back yields the same bits.
pub fn write_feature_table(path: &Path, rows: &[FeatureVector]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer
        .write_record(FEATURE_NAMES)
        .map_err(|e| csv_error(path, e))?;
    for row in rows {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| TrainingError::io(path, e))
}

pub fn write_labels(path: &Path, labels: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer
        .write_record([LABEL_COLUMN])
        .map_err(|e| csv_error(path, e))?;
    for label in labels {
        writer
            .write_record([label.to_string()])
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| TrainingError::io(path, e))
}

/// Row counts written by [`prepare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    pub output_dir: PathBuf,
}

/// Build feature rows from a raw loans table and write a seeded
/// shuffle split.
///
/// The raw table must have the six raw input columns and a `default`
/// label column. Other columns are ignored.
pub fn prepare(config: &PrepareConfig) -> Result<PrepareSummary> {
    let path = config.input.as_path();
    let mut reader = open_reader(path)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    for required in RAW_FEATURE_NAMES.iter().chain(std::iter::once(&LABEL_COLUMN)) {
        if !headers.iter().any(|h| h == *required) {
            return Err(TrainingError::data(
                path,
                format!("missing column '{}'", required),
            ));
        }
    }
    let label_idx = headers
        .iter()
        .position(|h| h == LABEL_COLUMN)
        .unwrap_or(0);

    let contract = FeatureContract::new();
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let row = contract
            .build_from_fields(|name| {
                headers
                    .iter()
                    .position(|h| h == name)
                    .and_then(|i| record.get(i))
            })
            .map_err(|e| TrainingError::data(path, format!("row {}: {}", line + 1, e)))?;
        let raw_label = record.get(label_idx).unwrap_or("");
        let label = parse_label(raw_label).ok_or_else(|| {
            TrainingError::data(
                path,
                format!("row {}: label '{}' is not 0 or 1", line + 1, raw_label),
            )
        })?;
        rows.push(row);
        labels.push(label);
    }

    let n = rows.len();
    if n < 2 {
        return Err(TrainingError::data(
            path,
            format!("need at least 2 rows to split, got {}", n),
        ));
    }
    let n_test = ((n as f64 * config.test_ratio).ceil() as usize).clamp(1, n - 1);

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(config.seed));
    let (test_idx, train_idx) = order.split_at(n_test);

    let pick_rows = |idx: &[usize]| idx.iter().map(|&i| rows[i]).collect::<Vec<_>>();
    let pick_labels = |idx: &[usize]| idx.iter().map(|&i| labels[i]).collect::<Vec<_>>();

    let out = &config.output;
    write_feature_table(&out.x_train(), &pick_rows(train_idx))?;
    write_feature_table(&out.x_test(), &pick_rows(test_idx))?;
    write_labels(&out.y_train(), &pick_labels(train_idx))?;
    write_labels(&out.y_test(), &pick_labels(test_idx))?;

    tracing::info!(
        input = %path.display(),
        train_rows = train_idx.len(),
        test_rows = test_idx.len(),
        seed = config.seed,
        "prepared processed tables"
    );
    Ok(PrepareSummary {
        train_rows: train_idx.len(),
        test_rows: test_idx.len(),
        output_dir: out.processed_dir.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "\
customer_id,credit_lines_outstanding,loan_amt_outstanding,total_debt_outstanding,income,years_employed,fico_score,default
1,0,5221.55,3915.47,78039.39,5,605,0
2,5,1958.93,8228.75,26648.44,2,572,1
3,0,3363.01,2027.83,65866.71,4,602,0
4,0,4766.65,2501.73,74356.88,5,612,0
5,1,1345.83,1768.83,23448.33,6,631,0
6,3,4000,10000,0,1,550,1
7,2,2500.5,6000.25,40000,3,590,1
8,0,3100,2400,61000,7,680,0
9,1,2800,3500,52000,4,640,0
10,4,3900,9100,30500,1,560,1
";

    fn write_raw(dir: &Path) -> PathBuf {
        let path = dir.join("loans.csv");
        fs::write(&path, RAW).unwrap();
        path
    }

    #[test]
    fn test_prepare_split_sizes_and_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_raw(tmp.path());
        let out = DataPaths::new(tmp.path().join("processed"));
        let summary = prepare(&PrepareConfig::new(&input).output(out.clone())).unwrap();
        assert_eq!(summary.test_rows, 2);
        assert_eq!(summary.train_rows, 8);

        let dataset = CsvDataSource::new(out).load().unwrap();
        assert_eq!(dataset.shape(), (8, 2));
    }

    #[test]
    fn test_prepare_is_seeded() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_raw(tmp.path());
        let a = DataPaths::new(tmp.path().join("a"));
        let b = DataPaths::new(tmp.path().join("b"));
        prepare(&PrepareConfig::new(&input).output(a.clone()).seed(7)).unwrap();
        prepare(&PrepareConfig::new(&input).output(b.clone()).seed(7)).unwrap();
        assert_eq!(
            fs::read(a.x_test()).unwrap(),
            fs::read(b.x_test()).unwrap()
        );
    }

    #[test]
    fn test_zero_income_row_keeps_guarded_ratio() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_raw(tmp.path());
        let out = DataPaths::new(tmp.path().join("processed"));
        prepare(&PrepareConfig::new(&input).output(out.clone())).unwrap();

        let dataset = CsvDataSource::new(out).load().unwrap();
        let all: Vec<FeatureVector> = dataset.x_train.into_iter().chain(dataset.x_test).collect();
        let row = all.iter().find(|r| r[3] == 0.0).unwrap();
        assert_eq!(row[6], 10000.0 / 1e-6);
        assert_eq!(row[7], 4000.0 / 1e-6);
    }

    #[test]
    fn test_feature_table_bits_survive_csv() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("X.csv");
        let rows = vec![[0.1, 1.0 / 3.0, 2e-300, 12345.678901234, 0.0, -1.5, 1e10, 7.0]];
        write_feature_table(&path, &rows).unwrap();
        assert_eq!(read_feature_table(&path).unwrap(), rows);
    }

    #[test]
    fn test_wrong_header_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("X.csv");
        fs::write(&path, "fico_score,income\n600,1000\n").unwrap();
        assert!(matches!(
            read_feature_table(&path),
            Err(TrainingError::Data { .. })
        ));
    }

    #[test]
    fn test_bad_labels_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("y.csv");
        fs::write(&path, "default\n0\n2\n").unwrap();
        let err = read_labels(&path).unwrap_err();
        assert!(err.to_string().contains("row 2"));

        fs::write(&path, "label\n0\n").unwrap();
        assert!(read_labels(&path).is_err());

        fs::write(&path, "default\n0\n1.0\n").unwrap();
        assert_eq!(read_labels(&path).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_prepare_reports_bad_row() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("loans.csv");
        fs::write(
            &path,
            "credit_lines_outstanding,loan_amt_outstanding,total_debt_outstanding,income,years_employed,fico_score,default\n\
             1,2,3,4,5,abc,0\n1,2,3,4,5,6,1\n",
        )
        .unwrap();
        let err = prepare(&PrepareConfig::new(&path).output(DataPaths::new(tmp.path().join("p"))))
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("row 1"));
        assert!(text.contains("fico_score"));
    }

    #[test]
    fn test_prepare_missing_column() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("loans.csv");
        fs::write(&path, "income,default\n1,0\n").unwrap();
        let err = prepare(&PrepareConfig::new(&path)).unwrap_err();
        assert!(err.to_string().contains("missing column 'credit_lines_outstanding'"));
    }
}
