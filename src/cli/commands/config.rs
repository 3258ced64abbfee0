//! Config Command
//!
//! Usage:
//!   hr-analytics config show [-g] [-f json]
//!   hr-analytics config path
//!   hr-analytics config init [-g] [--force]

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show configuration
pub fn show(global: bool, format: &str) -> Result<()> {
    if !global {
        // Merged effective config
        return ConfigLoader::show_config(format == "json");
    }

    match ConfigLoader::global_config_path() {
        Some(path) if path.exists() => {
            println!("# Global Config: {}\n", path.display());
            println!("{}", std::fs::read_to_string(&path)?);
        }
        Some(_) => {
            println!("No global config found.");
            println!("Run 'hr-analytics config init --global' to create one.");
        }
        None => println!("Cannot determine global config directory."),
    }
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Initialize global configuration
pub fn init_global(force: bool) -> Result<()> {
    let dir = ConfigLoader::init_global(force)?;
    let out = Output::new();
    out.success("Initialized global configuration");
    println!("  Directory: {}", dir.display());
    if let Some(config_path) = ConfigLoader::global_config_path() {
        println!("  Config:    {}", config_path.display());
    }
    Ok(())
}

/// Initialize project configuration
pub fn init_project(force: bool) -> Result<()> {
    let dir = ConfigLoader::init_project(force)?;
    let out = Output::new();
    out.success("Initialized project configuration");
    println!("  Directory: {}", dir.display());
    println!(
        "  Config:    {}",
        ConfigLoader::project_config_path().display()
    );
    Ok(())
}
