//! Per-country worksheet upload
//!
//! Each configured raw export is copied verbatim into the worksheet named
//! after its country. A failing worksheet is logged and recorded; the run
//! always moves on to the next one.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

use super::SheetsClient;
use crate::ai::with_timeout;
use crate::config::{IngestConfig, SheetsConfig};
use crate::constants::sheets::{MIN_COLUMNS, MIN_ROWS};
use crate::types::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedSheet {
    pub worksheet: String,
    pub path: PathBuf,
    /// Data rows, header excluded
    pub rows: usize,
    /// Whether the worksheet had to be added
    pub created: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetFailure {
    pub worksheet: String,
    pub reason: String,
}

/// Outcome of an upload run
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadReport {
    pub uploaded: Vec<UploadedSheet>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<SheetFailure>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Read a CSV file as text rows, header first
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

pub struct SheetsUploader<'a> {
    client: &'a dyn SheetsClient,
    config: &'a SheetsConfig,
    timeout: Duration,
}

impl<'a> SheetsUploader<'a> {
    pub fn new(client: &'a dyn SheetsClient, config: &'a SheetsConfig) -> Self {
        Self {
            client,
            config,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Override the per-worksheet timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Upload every configured source that exists on disk
    pub async fn upload_all(&self, ingest: &IngestConfig) -> UploadReport {
        let mut report = UploadReport::default();

        for source in &ingest.sources {
            let path = ingest.raw_dir.join(&source.file);
            let worksheet = self.config.worksheet_title(&source.country);

            if !path.exists() {
                warn!("File not found: {}", path.display());
                report.skipped.push(path);
                continue;
            }

            info!(
                "Uploading {} to {} via {}",
                path.display(),
                worksheet,
                self.client.name()
            );
            let operation = format!("Upload to worksheet {}", worksheet);
            match with_timeout(self.timeout, self.upload_sheet(&path, &worksheet), &operation).await
            {
                Ok(sheet) => {
                    info!("Uploaded {} rows to sheet: {}", sheet.rows, sheet.worksheet);
                    report.uploaded.push(sheet);
                }
                Err(e) => {
                    if e.is_external() {
                        warn!("Failed for {}: {}", worksheet, e);
                    } else {
                        error!("Failed for {}: {}", worksheet, e);
                    }
                    report.failed.push(SheetFailure {
                        worksheet,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Clear or create `worksheet`, then write the file into it
    async fn upload_sheet(&self, path: &Path, worksheet: &str) -> Result<UploadedSheet> {
        let rows = read_rows(path)?;

        let exists = self
            .client
            .worksheet_titles()
            .await?
            .iter()
            .any(|title| title == worksheet);

        if exists {
            self.client.clear_worksheet(worksheet).await?;
        } else {
            let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
            self.client
                .add_worksheet(worksheet, rows.len().max(MIN_ROWS), columns.max(MIN_COLUMNS))
                .await?;
        }

        if !rows.is_empty() {
            self.client.write_rows(worksheet, &rows).await?;
        }

        Ok(UploadedSheet {
            worksheet: worksheet.to_string(),
            path: path.to_path_buf(),
            rows: rows.len().saturating_sub(1),
            created: !exists,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceFile;
    use crate::types::HrError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const HEADER: &str = "id,name,dept,salary,attrition,engagement,perf_score,absenteeism_days";

    #[derive(Default)]
    struct MockClient {
        existing: Vec<&'static str>,
        fail_on: Option<&'static str>,
        hang_on: Option<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl MockClient {
        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SheetsClient for MockClient {
        async fn worksheet_titles(&self) -> Result<Vec<String>> {
            self.log("titles".to_string());
            Ok(self.existing.iter().map(|t| t.to_string()).collect())
        }

        async fn add_worksheet(&self, title: &str, rows: usize, columns: usize) -> Result<()> {
            self.log(format!("add {title} {rows}x{columns}"));
            Ok(())
        }

        async fn clear_worksheet(&self, title: &str) -> Result<()> {
            self.log(format!("clear {title}"));
            Ok(())
        }

        async fn write_rows(&self, title: &str, rows: &[Vec<String>]) -> Result<()> {
            if self.hang_on == Some(title) {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            if self.fail_on == Some(title) {
                return Err(HrError::SheetsApi("429 quota exceeded".to_string()));
            }
            self.log(format!("write {title} {}", rows.len()));
            Ok(())
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    /// India and US exports on disk, Germany configured but missing
    fn raw_dir() -> (TempDir, IngestConfig) {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("employees_india.csv"),
            format!("{HEADER}\n1,Asha,Sales,40000,Yes,3.1,4,2\n2,Ravi,R&D,52000,No,4.2,5,0\n"),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("employees_us.csv"),
            format!("{HEADER}\n1,Sam,Sales,70000,No,3.9,3,1\n"),
        )
        .unwrap();

        let config = IngestConfig {
            raw_dir: dir.path().to_path_buf(),
            sources: [
                ("employees_india.csv", "India"),
                ("employees_us.csv", "US"),
                ("employees_germany.csv", "Germany"),
            ]
            .iter()
            .map(|(file, country)| SourceFile {
                file: file.to_string(),
                country: country.to_string(),
            })
            .collect(),
        };
        (dir, config)
    }

    #[test]
    fn test_read_rows_keeps_header_and_text() {
        let (dir, _) = raw_dir();
        let rows = read_rows(&dir.path().join("employees_india.csv")).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "id");
        assert_eq!(rows[1], vec!["1", "Asha", "Sales", "40000", "Yes", "3.1", "4", "2"]);
    }

    #[tokio::test]
    async fn test_existing_sheet_cleared_missing_sheet_created() {
        let (_dir, ingest) = raw_dir();
        let client = MockClient {
            existing: vec!["Sheet1", "HR_India"],
            ..MockClient::default()
        };
        let sheets = SheetsConfig::default();

        let report = SheetsUploader::new(&client, &sheets).upload_all(&ingest).await;

        assert_eq!(
            client.calls(),
            vec![
                "titles",
                "clear HR_India",
                "write HR_India 3",
                "titles",
                "add HR_US 1000x20",
                "write HR_US 2",
            ]
        );

        let uploaded: Vec<(&str, usize, bool)> = report
            .uploaded
            .iter()
            .map(|s| (s.worksheet.as_str(), s.rows, s.created))
            .collect();
        assert_eq!(uploaded, vec![("HR_India", 2, false), ("HR_US", 1, true)]);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].ends_with("employees_germany.csv"));
        assert!(report.failed.is_empty());
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn test_sheet_failure_does_not_abort_run() {
        let (_dir, ingest) = raw_dir();
        let client = MockClient {
            fail_on: Some("HR_India"),
            ..MockClient::default()
        };
        let sheets = SheetsConfig::default();

        let report = SheetsUploader::new(&client, &sheets).upload_all(&ingest).await;

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].worksheet, "HR_India");
        assert!(report.failed[0].reason.contains("429"));
        assert_eq!(report.uploaded.len(), 1);
        assert_eq!(report.uploaded[0].worksheet, "HR_US");
    }

    #[tokio::test]
    async fn test_hanging_sheet_times_out_and_run_continues() {
        let (_dir, ingest) = raw_dir();
        let client = MockClient {
            hang_on: Some("HR_India"),
            ..MockClient::default()
        };
        let sheets = SheetsConfig::default();

        let report = SheetsUploader::new(&client, &sheets)
            .with_timeout(Duration::from_millis(20))
            .upload_all(&ingest)
            .await;

        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].reason.contains("HR_India"));
        assert_eq!(report.uploaded[0].worksheet, "HR_US");
    }

    #[tokio::test]
    async fn test_unreadable_file_recorded_as_failure() {
        let (dir, ingest) = raw_dir();
        // ragged row
        std::fs::write(dir.path().join("employees_us.csv"), "a,b\n1,2,3\n").unwrap();
        let client = MockClient::default();
        let sheets = SheetsConfig::default();

        let report = SheetsUploader::new(&client, &sheets).upload_all(&ingest).await;

        assert_eq!(report.uploaded.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].worksheet, "HR_US");
        assert!(!client.calls().iter().any(|c| c.contains("HR_US")));
    }

    #[tokio::test]
    async fn test_new_sheet_grows_past_default_grid() {
        let dir = TempDir::new().unwrap();
        let mut text = format!("{HEADER}\n");
        for i in 0..1200 {
            text.push_str(&format!("{i},N{i},Sales,1,No,3,3,0\n"));
        }
        std::fs::write(dir.path().join("big.csv"), text).unwrap();
        let ingest = IngestConfig {
            raw_dir: dir.path().to_path_buf(),
            sources: vec![SourceFile {
                file: "big.csv".to_string(),
                country: "UK".to_string(),
            }],
        };
        let client = MockClient::default();
        let sheets = SheetsConfig::default();

        let report = SheetsUploader::new(&client, &sheets).upload_all(&ingest).await;

        assert!(report.is_complete());
        assert_eq!(report.uploaded[0].rows, 1200);
        assert!(client.calls().contains(&"add HR_UK 1201x20".to_string()));
    }
}
