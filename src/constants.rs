//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Project layout constants
pub mod project {
    /// Project data directory (config, database)
    pub const DATA_DIR: &str = ".hr-analytics";

    /// Config file name inside the data directory
    pub const CONFIG_FILE: &str = "config.toml";

    /// Default SQLite database path
    pub const DEFAULT_DB_PATH: &str = ".hr-analytics/hr_data.db";

    /// Environment variable prefix for config overrides
    pub const ENV_PREFIX: &str = "HR_ANALYTICS_";
}

/// Storage constants
pub mod storage {
    /// Default maximum pooled connections
    pub const DEFAULT_POOL_SIZE: u32 = 4;

    /// Timeout for acquiring a pooled connection (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 30;
}

/// Ingestion constants
pub mod ingest {
    /// Default directory holding the per-country raw exports
    pub const DEFAULT_RAW_DIR: &str = "data/raw";

    /// Default full-table CSV export path
    pub const DEFAULT_EMPLOYEES_CSV: &str = "employees.csv";

    /// Default (file, country) source mapping
    pub const DEFAULT_SOURCES: &[(&str, &str)] = &[
        ("employees_india.csv", "India"),
        ("employees_us.csv", "US"),
        ("employees_uk.csv", "UK"),
        ("employees_germany.csv", "Germany"),
    ];
}

/// Summary report constants
pub mod report {
    /// Report file name prefix; the date and `.csv` are appended
    pub const FILE_PREFIX: &str = "HR_Report_";

    /// Separator for joined top-performer names
    pub const NAME_SEPARATOR: &str = ", ";
}

/// LLM network constants
pub mod network {
    /// Default OpenAI-compatible API base
    pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

    /// Default chat model for insight generation
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Default completion length
    pub const DEFAULT_MAX_TOKENS: usize = 512;
}

/// Google Sheets upload constants
pub mod sheets {
    /// Sheets API v4 base
    pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";

    /// OAuth scope for reading and writing spreadsheets
    pub const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

    /// Default service-account key file
    pub const DEFAULT_CREDENTIALS: &str = "credentials.json";

    /// Worksheet title prefix; the country is appended
    pub const WORKSHEET_PREFIX: &str = "HR_";

    /// Minimum grid size of a newly created worksheet
    pub const MIN_ROWS: usize = 1000;
    pub const MIN_COLUMNS: usize = 20;

    /// Default per-worksheet timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
}
