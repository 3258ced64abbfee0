//! Summary reporting

pub mod summary;

pub use summary::{COLUMNS, SummaryRecord, SummaryReportBuilder};
