//! Google Sheets Upload
//!
//! Mirrors each per-country raw export into its own worksheet of a shared
//! spreadsheet. The remote side sits behind the `SheetsClient` trait so the
//! upload flow can run against a mock.

mod google;
mod upload;

pub use google::GoogleSheetsClient;
pub use upload::{SheetFailure, SheetsUploader, UploadReport, UploadedSheet, read_rows};

use async_trait::async_trait;

use crate::types::Result;

/// Worksheet operations needed by the uploader
#[async_trait]
pub trait SheetsClient: Send + Sync {
    /// Titles of every worksheet in the spreadsheet
    async fn worksheet_titles(&self) -> Result<Vec<String>>;

    /// Add an empty worksheet with at least `rows` x `columns` cells
    async fn add_worksheet(&self, title: &str, rows: usize, columns: usize) -> Result<()>;

    /// Remove every value from an existing worksheet
    async fn clear_worksheet(&self, title: &str) -> Result<()>;

    /// Write `rows` starting at the top-left cell
    async fn write_rows(&self, title: &str, rows: &[Vec<String>]) -> Result<()>;

    /// Client name for logging
    fn name(&self) -> &str;
}
