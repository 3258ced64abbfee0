//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Classes
//!
//! - **System**: IO, SQLite, JSON and CSV failures (auto `From` impls)
//! - **Ingestion**: malformed employee rows, missing source data
//! - **External**: LLM and Sheets API failures and timeouts, isolated by
//!   the caller
//!
//! Empty data sets and unrecognized questions are not errors; they are
//! handled with sentinels and guidance text.

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum HrError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // -------------------------------------------------------------------------
    // Ingestion Errors
    // -------------------------------------------------------------------------
    /// A row that cannot become an `EmployeeRecord`
    #[error("Malformed record at row {row}: field '{field}' has invalid value '{value}' ({reason})")]
    MalformedRecord {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("No source data loaded from {raw_dir}: check the configured file paths")]
    NoSourceData { raw_dir: String },

    // -------------------------------------------------------------------------
    // External Service Errors
    // -------------------------------------------------------------------------
    #[error("LLM API error: {0}")]
    LlmApi(String),

    #[error("Sheets API error: {0}")]
    SheetsApi(String),

    /// Operation timeout with context
    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Not initialized: run 'hr-analytics init' first")]
    NotInitialized,

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, HrError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl HrError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a malformed-record error naming the offending field
    pub fn malformed(
        row: usize,
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            row,
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error comes from an external service (LLM, Sheets)
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Self::LlmApi(_) | Self::SheetsApi(_) | Self::Timeout { .. }
        )
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| HrError::Storage(format!("{}: {}", context.into(), e)))
    }

    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| HrError::Storage(format!("{}: {}", f().into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================
