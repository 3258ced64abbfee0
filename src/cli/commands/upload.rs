//! Upload Command
//!
//! Copy each per-country raw export into its own worksheet of the configured
//! spreadsheet. A failing worksheet is reported and the rest still upload.

use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::require_initialized;
use crate::config::ConfigLoader;
use crate::sheets::{GoogleSheetsClient, SheetsUploader};
use crate::types::Result;

pub async fn run(raw_dir: Option<PathBuf>) -> Result<()> {
    require_initialized()?;
    let mut config = ConfigLoader::load()?;
    if let Some(dir) = raw_dir {
        config.ingest.raw_dir = dir;
    }

    let client = GoogleSheetsClient::connect(&config.sheets).await?;
    let report = SheetsUploader::new(&client, &config.sheets)
        .upload_all(&config.ingest)
        .await;

    let out = Output::new();
    for sheet in &report.uploaded {
        let action = if sheet.created { "new sheet" } else { "sheet" };
        out.success(&format!(
            "Uploaded {} to {}: {} ({} rows)",
            sheet.path.display(),
            action,
            sheet.worksheet,
            sheet.rows
        ));
    }
    for path in &report.skipped {
        out.warning(&format!("File not found: {}", path.display()));
    }
    for failure in &report.failed {
        out.error(&format!("Failed for {}: {}", failure.worksheet, failure.reason));
    }
    out.info(&format!(
        "{} of {} worksheets uploaded",
        report.uploaded.len(),
        config.ingest.sources.len()
    ));

    Ok(())
}
