//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/hr-analytics/) and project (.hr-analytics/)
//! level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{ingest, network, project, sheets, storage};
use crate::types::{HrError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// SQLite store settings
    pub database: DatabaseConfig,

    /// Raw CSV ingestion settings
    pub ingest: IngestConfig,

    /// CSV export settings
    pub export: ExportConfig,

    /// LLM provider settings (AI insights)
    pub llm: LlmConfig,

    /// Google Sheets upload settings
    pub sheets: SheetsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            database: DatabaseConfig::default(),
            ingest: IngestConfig::default(),
            export: ExportConfig::default(),
            llm: LlmConfig::default(),
            sheets: SheetsConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `HrError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(HrError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(HrError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.sheets.timeout_secs == 0 {
            return Err(HrError::Config(
                "Sheets timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.database.pool_size == 0 {
            return Err(HrError::Config(
                "Database pool_size must be greater than 0".to_string(),
            ));
        }

        if let Some(source) = self
            .ingest
            .sources
            .iter()
            .find(|s| s.file.trim().is_empty() || s.country.trim().is_empty())
        {
            return Err(HrError::Config(format!(
                "Ingest source entries need both file and country, got file='{}' country='{}'",
                source.file, source.country
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Database Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file path
    pub path: PathBuf,

    /// Maximum pooled connections
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(project::DEFAULT_DB_PATH),
            pool_size: storage::DEFAULT_POOL_SIZE,
        }
    }
}

// =============================================================================
// Ingest Configuration
// =============================================================================

/// One per-country raw export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// File name relative to `raw_dir`
    pub file: String,
    /// Country stamped on every row of the file
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Directory holding the raw exports
    pub raw_dir: PathBuf,

    /// Files to load, in order
    pub sources: Vec<SourceFile>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from(ingest::DEFAULT_RAW_DIR),
            sources: ingest::DEFAULT_SOURCES
                .iter()
                .map(|(file, country)| SourceFile {
                    file: file.to_string(),
                    country: country.to_string(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Export Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Full-table CSV export path
    pub employees_csv: PathBuf,

    /// Directory for dated summary reports
    pub report_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            employees_csv: PathBuf::from(ingest::DEFAULT_EMPLOYEES_CSV),
            report_dir: PathBuf::from("."),
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,

    /// API base URL (OpenAI-compatible endpoints)
    pub api_base: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Temperature for LLM generation
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: usize,

    /// API key; `OPENAI_API_KEY` is used when unset. Never serialized.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: network::DEFAULT_MODEL.to_string(),
            api_base: network::DEFAULT_API_BASE.to_string(),
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.7,
            max_tokens: network::DEFAULT_MAX_TOKENS,
            api_key: None,
        }
    }
}

// =============================================================================
// Sheets Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// Target spreadsheet id (the long key in the sheet URL)
    pub spreadsheet_id: Option<String>,

    /// Service-account JSON key file
    pub credentials: PathBuf,

    /// Worksheet title prefix; one worksheet per source country
    pub worksheet_prefix: String,

    /// Sheets API base URL
    pub api_base: String,

    /// Per-worksheet timeout in seconds
    pub timeout_secs: u64,
}

impl SheetsConfig {
    /// Worksheet title for a source country
    pub fn worksheet_title(&self, country: &str) -> String {
        format!("{}{}", self.worksheet_prefix, country)
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            credentials: PathBuf::from(sheets::DEFAULT_CREDENTIALS),
            worksheet_prefix: sheets::WORKSHEET_PREFIX.to_string(),
            api_base: sheets::DEFAULT_API_BASE.to_string(),
            timeout_secs: sheets::DEFAULT_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
