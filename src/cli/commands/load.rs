//! Load Command
//!
//! Ingest the configured per-country CSV exports into the store.

use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::{create_database, require_initialized};
use crate::config::ConfigLoader;
use crate::ingest;
use crate::types::Result;

pub fn run(raw_dir: Option<PathBuf>) -> Result<()> {
    require_initialized()?;
    let mut config = ConfigLoader::load()?;
    if let Some(dir) = raw_dir {
        config.ingest.raw_dir = dir;
    }

    let db = create_database(&config)?;
    let summary = ingest::load_into(&db, &config.ingest)?;

    let out = Output::new();
    for file in &summary.loaded {
        out.success(&format!(
            "Loaded {} ({} rows, {})",
            file.path.display(),
            file.rows,
            file.country
        ));
    }
    for path in &summary.skipped {
        out.warning(&format!("File not found: {}", path.display()));
    }
    out.info(&format!(
        "{} employees loaded into table 'employees'",
        summary.total_rows
    ));

    Ok(())
}
