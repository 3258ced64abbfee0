//! CLI Common Utilities
//!
//! Shared initialization, context and filter resolution for CLI commands.

use clap::Args;
use std::path::{Path, PathBuf};

use crate::analytics::{DataSet, DataSetFilter};
use crate::config::{Config, ConfigLoader};
use crate::constants::project;
use crate::storage::{Database, EmployeeStore, PoolConfig};
use crate::types::{HrError, Result};

/// Selection flags shared by the dashboard, ask, report and insights commands
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Country to analyze (default: first country alphabetically)
    #[arg(long)]
    pub country: Option<String>,

    /// Department to include; repeat for several (default: all)
    #[arg(long = "dept", value_name = "DEPT")]
    pub departments: Vec<String>,

    /// Only employees who left
    #[arg(long)]
    pub attrited_only: bool,
}

impl FilterArgs {
    /// Build the filter, defaulting the country to the first of
    /// `countries` (expected sorted).
    pub fn resolve(&self, countries: &[String]) -> DataSetFilter {
        let country = self.country.clone().or_else(|| countries.first().cloned());

        let mut filter = DataSetFilter::new()
            .departments(self.departments.iter().cloned())
            .attrited_only(self.attrited_only);
        if let Some(country) = country {
            filter = filter.country(country);
        }
        filter
    }
}

/// Command execution context
///
/// Loaded configuration plus an open store. Created via
/// `CommandContext::load()` for commands that read employee data.
pub struct CommandContext {
    pub config: Config,
    pub db: Database,
}

impl CommandContext {
    /// Validates initialization, loads config, and opens the database.
    pub fn load() -> Result<Self> {
        require_initialized()?;
        let config = ConfigLoader::load()?;
        let db = open_database(&config)?;
        Ok(Self { config, db })
    }

    pub fn store(&self) -> EmployeeStore<'_> {
        EmployeeStore::new(&self.db)
    }

    /// Resolve `args` against the stored countries and load the selection
    pub fn select(&self, args: &FilterArgs) -> Result<(DataSetFilter, DataSet)> {
        let store = self.store();
        let filter = args.resolve(&store.countries()?);
        let ds = store.load(&filter)?;
        tracing::debug!("Selection '{}': {} employees", filter.describe(), ds.len());
        Ok((filter, ds))
    }
}

/// Require the project directory to exist
pub fn require_initialized() -> Result<PathBuf> {
    let dir = Path::new(project::DATA_DIR);
    if !dir.exists() {
        return Err(HrError::NotInitialized);
    }
    Ok(dir.to_path_buf())
}

/// Open the configured database; it must already exist.
pub fn open_database(config: &Config) -> Result<Database> {
    let path = &config.database.path;
    if !path.exists() {
        return Err(HrError::NotInitialized);
    }
    Database::open_with_config(path, PoolConfig::with_max_size(config.database.pool_size))
}

/// Create (if needed) and initialize the configured database
pub fn create_database(config: &Config) -> Result<Database> {
    let path = &config.database.path;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::open_with_config(path, PoolConfig::with_max_size(config.database.pool_size))?;
    db.initialize()?;
    Ok(db)
}
