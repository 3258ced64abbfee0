//! Raw CSV ingestion
//!
//! Reads each configured per-country export, stamps its country on every
//! row and replaces the `employees` table with the combined result.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::IngestConfig;
use crate::storage::{Database, EmployeeStore};
use crate::types::{EmployeeRecord, HrError, RawEmployee, Result};

/// One source file that was read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub country: String,
    pub rows: usize,
}

/// Outcome of a load run
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadSummary {
    pub loaded: Vec<LoadedFile>,
    pub skipped: Vec<PathBuf>,
    pub total_rows: usize,
}

/// Read and validate one export, overriding any country column with
/// `country`.
pub fn read_source(path: &Path, country: &str) -> Result<Vec<EmployeeRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<RawEmployee>().enumerate() {
        let mut raw = row?;
        raw.country = Some(country.to_string());
        let record = raw
            .validate(idx + 1)
            .inspect_err(|e| error!("Rejected {}: {}", path.display(), e))?;
        records.push(record);
    }

    debug!("Read {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Read every configured source; missing files are skipped.
pub fn collect_sources(config: &IngestConfig) -> Result<(Vec<EmployeeRecord>, LoadSummary)> {
    let mut all = Vec::new();
    let mut summary = LoadSummary::default();

    for source in &config.sources {
        let path = config.raw_dir.join(&source.file);
        if !path.exists() {
            warn!("File not found: {}", path.display());
            summary.skipped.push(path);
            continue;
        }

        let records = read_source(&path, &source.country)?;
        info!("Loaded {} ({} rows, {})", source.file, records.len(), source.country);
        summary.loaded.push(LoadedFile {
            path,
            country: source.country.clone(),
            rows: records.len(),
        });
        all.extend(records);
    }

    if summary.loaded.is_empty() {
        return Err(HrError::NoSourceData {
            raw_dir: config.raw_dir.display().to_string(),
        });
    }

    summary.total_rows = all.len();
    Ok((all, summary))
}

/// Load every configured source into the store, replacing its contents.
/// The store is untouched when nothing could be loaded.
pub fn load_into(db: &Database, config: &IngestConfig) -> Result<LoadSummary> {
    let (records, summary) = collect_sources(config)?;
    EmployeeStore::new(db).replace_all(&records)?;
    info!("Loaded {} employees into the store", summary.total_rows);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceFile;
    use std::fs;

    const HEADER: &str = "id,name,dept,salary,attrition,engagement,perf_score,absenteeism_days";

    fn write(dir: &Path, file: &str, rows: &[&str]) {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        fs::write(dir.join(file), text).unwrap();
    }

    fn config(dir: &Path, sources: &[(&str, &str)]) -> IngestConfig {
        IngestConfig {
            raw_dir: dir.to_path_buf(),
            sources: sources
                .iter()
                .map(|(file, country)| SourceFile {
                    file: file.to_string(),
                    country: country.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_read_source_stamps_country() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "employees_india.csv",
            &["1,Asha,Sales,30000,No,4.1,4,2", "2,Ravi,R&D,42000,Yes,3.2,5,6"],
        );

        let records = read_source(&dir.path().join("employees_india.csv"), "India").unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.country == "India"));
        assert_eq!(records[1].absenteeism_days, 6);
    }

    #[test]
    fn test_read_source_reports_malformed_row() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "bad.csv",
            &["1,Asha,Sales,30000,No,4.1,4,2", "2,Ravi,R&D,lots,Yes,3.2,5,6"],
        );

        let err = read_source(&dir.path().join("bad.csv"), "US").unwrap_err();
        match err {
            HrError::MalformedRecord { row, field, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "salary");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "employees_us.csv", &["7,John,Sales,70000,Yes,3.5,3,1"]);

        let cfg = config(
            dir.path(),
            &[("employees_india.csv", "India"), ("employees_us.csv", "US")],
        );
        let (records, summary) = collect_sources(&cfg).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(summary.total_rows, 1);
        assert_eq!(summary.loaded.len(), 1);
        assert_eq!(summary.loaded[0].country, "US");
        assert_eq!(summary.skipped, vec![dir.path().join("employees_india.csv")]);
    }

    #[test]
    fn test_nothing_loaded_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "employees_us.csv", &["7,John,Sales,70000,Yes,3.5,3,1"]);

        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        load_into(&db, &config(dir.path(), &[("employees_us.csv", "US")])).unwrap();

        let empty = config(dir.path(), &[("employees_uk.csv", "UK")]);
        let err = load_into(&db, &empty).unwrap_err();
        assert!(matches!(err, HrError::NoSourceData { .. }));
        assert_eq!(EmployeeStore::new(&db).count().unwrap(), 1);
    }

    #[test]
    fn test_load_replaces_table() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "employees_india.csv",
            &["1,Asha,Sales,30000,No,4.1,4,2"],
        );
        write(
            dir.path(),
            "employees_uk.csv",
            &["1,Oliver,HR,52000,No,3.9,4,0", "2,Emma,Sales,48000,Yes,2.8,2,9"],
        );

        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let cfg = config(
            dir.path(),
            &[("employees_india.csv", "India"), ("employees_uk.csv", "UK")],
        );

        load_into(&db, &cfg).unwrap();
        let summary = load_into(&db, &cfg).unwrap();
        assert_eq!(summary.total_rows, 3);

        let store = EmployeeStore::new(&db);
        assert_eq!(store.count().unwrap(), 3);
        assert_eq!(store.countries().unwrap(), vec!["India", "UK"]);
    }
}
