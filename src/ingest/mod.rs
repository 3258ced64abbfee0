//! CSV ingestion and export

pub mod export;
pub mod loader;

pub use export::{export_table, write_employees};
pub use loader::{LoadSummary, LoadedFile, collect_sources, load_into, read_source};
