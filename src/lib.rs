//! HR Analytics
//!
//! Loads per-country employee exports into SQLite and answers HR questions
//! over filtered selections of them.
//!
//! ## Core Features
//!
//! - **Ingestion**: per-country CSV exports stamped with their country
//! - **Analytics**: pure aggregate metrics over an immutable `DataSet`
//! - **Assistant**: keyword intent classification with canned answers
//! - **Reporting**: fixed six-column summary CSV
//! - **AI Insights**: optional LLM summary, isolated from other views
//! - **Sheets Upload**: per-country worksheets in Google Sheets
//!
//! ## Quick Start
//!
//! ```ignore
//! use hr_analytics::{Database, DataSetFilter, EmployeeStore, SummaryReportBuilder};
//!
//! let db = Database::open(".hr-analytics/hr_data.db")?;
//! let ds = EmployeeStore::new(&db).load(&DataSetFilter::new().country("India"))?;
//! let summary = SummaryReportBuilder::build(&ds);
//! println!("{}", hr_analytics::assistant::answer("average salary?", &ds).1);
//! ```
//!
//! ## Modules
//!
//! - [`analytics`]: `DataSet` and the aggregation library
//! - [`assistant`]: intent classification and responses
//! - [`report`]: summary record and CSV contract
//! - [`ai`]: insight prompt and LLM provider
//! - [`storage`]: SQLite persistence with connection pooling
//! - [`ingest`]: CSV load and export
//! - [`sheets`]: Google Sheets upload
//! - [`config`]: layered configuration

pub mod ai;
pub mod analytics;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod constants;
pub mod ingest;
pub mod report;
pub mod sheets;
pub mod storage;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{HrError, Result, ResultExt};

// Data model
pub use types::{Attrition, EmployeeRecord, RawEmployee};

// Storage
pub use storage::{Database, EmployeeStore, KpiStore, PoolConfig};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use analytics::{DataSet, DataSetFilter};
pub use assistant::{Intent, IntentClassifier};
pub use report::{SummaryRecord, SummaryReportBuilder};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{InsightOutcome, InsightPrompt, SummaryProvider, generate_insights, with_timeout};

// =============================================================================
// Sheets Re-exports
// =============================================================================

pub use sheets::{SheetsClient, SheetsUploader, UploadReport};
