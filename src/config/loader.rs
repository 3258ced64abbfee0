//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/hr-analytics/config.toml)
//! 3. Project config (.hr-analytics/config.toml)
//! 4. Environment variables (HR_ANALYTICS_* prefix, `__` between sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::project;
use crate::types::{HrError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // e.g. HR_ANALYTICS_LLM__TIMEOUT_SECS -> llm.timeout_secs
        figment = figment.merge(Env::prefixed(project::ENV_PREFIX).split("__").lowercase(true));

        Self::extract(figment)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .extract()
            .map_err(|e| HrError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/hr-analytics/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("hr-analytics"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(project::CONFIG_FILE))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join(project::CONFIG_FILE)
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(project::DATA_DIR)
    }

    /// Check if project is initialized
    pub fn is_project_initialized() -> bool {
        Self::project_dir().exists()
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| HrError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            HrError::Config("Cannot determine global config directory".to_string())
        })?;

        fs::create_dir_all(&global_dir)?;

        let config_path = global_dir.join(project::CONFIG_FILE);
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_global_config())?;
            info!("Created global config: {}", config_path.display());
        } else {
            info!("Global config exists: {}", config_path.display());
        }

        Ok(global_dir)
    }

    /// Initialize project configuration under `root`
    ///
    /// An existing config is kept unless `force` is set.
    pub fn init_project_at(root: &Path, force: bool) -> Result<PathBuf> {
        let project_dir = root.join(project::DATA_DIR);
        fs::create_dir_all(&project_dir)?;

        let config_path = project_dir.join(project::CONFIG_FILE);
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_project_config())?;
            info!("Created project config: {}", config_path.display());
        } else {
            info!("Project config exists: {}", config_path.display());
        }

        Ok(project_dir)
    }

    /// Initialize project configuration in the current directory
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let root = env::current_dir()?;
        Self::init_project_at(&root, force)?;
        Ok(Self::project_dir())
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default global config content (TOML)
    fn default_global_config() -> String {
        r#"# HR Analytics Global Configuration
# User-wide defaults. Project settings in .hr-analytics/config.toml override these.

version = "1.0"

# LLM settings (AI insights). The API key is read from OPENAI_API_KEY.
[llm]
provider = "openai"
model = "gpt-3.5-turbo"
timeout_secs = 60
"#
        .to_string()
    }

    /// Generate default project config content (TOML)
    fn default_project_config() -> String {
        r#"# HR Analytics Project Configuration
# Project-specific settings that override global defaults.

version = "1.0"

[database]
path = ".hr-analytics/hr_data.db"

# Per-country raw exports loaded by `hr-analytics load`
[ingest]
raw_dir = "data/raw"

[[ingest.sources]]
file = "employees_india.csv"
country = "India"

[[ingest.sources]]
file = "employees_us.csv"
country = "US"

[[ingest.sources]]
file = "employees_uk.csv"
country = "UK"

[[ingest.sources]]
file = "employees_germany.csv"
country = "Germany"

[export]
employees_csv = "employees.csv"
report_dir = "."

# Google Sheets upload (`hr-analytics upload`): one worksheet per country
[sheets]
# spreadsheet_id = "<id from the sheet URL>"
credentials = "credentials.json"
worksheet_prefix = "HR_"
"#
        .to_string()
    }
}
