//! Init Command
//!
//! Create the project directory, default configuration and an empty store.

use crate::cli::ui::Output;
use crate::cli::util::create_database;
use crate::config::ConfigLoader;
use crate::types::{HrError, Result};

pub fn run(force: bool) -> Result<()> {
    if ConfigLoader::is_project_initialized() && !force {
        return Err(HrError::Config(
            "Already initialized. Use --force to overwrite.".to_string(),
        ));
    }

    let project_dir = ConfigLoader::init_project(force)?;

    // Global config is optional; never overwrite it here
    if let Err(e) = ConfigLoader::init_global(false) {
        tracing::debug!("Global config init skipped: {}", e);
    }

    let config = ConfigLoader::load()?;
    create_database(&config)?;

    let out = Output::new();
    out.success(&format!("Initialized HR Analytics in {}/", project_dir.display()));
    println!("  Database: {}", config.database.path.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Put the per-country exports in {}/",
        config.ingest.raw_dir.display()
    );
    println!("  2. Run 'hr-analytics load'");
    println!("  3. Run 'hr-analytics dashboard' or 'hr-analytics ask'");

    Ok(())
}
