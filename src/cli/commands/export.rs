//! Export Command
//!
//! Write the whole `employees` table to CSV.

use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::ingest;
use crate::types::Result;

pub fn run(output: Option<PathBuf>) -> Result<()> {
    let ctx = CommandContext::load()?;
    let path = output.unwrap_or_else(|| ctx.config.export.employees_csv.clone());

    let rows = ingest::export_table(&ctx.db, &path)?;
    Output::new().success(&format!(
        "Exported {} employees to {}",
        rows,
        path.display()
    ));
    Ok(())
}
