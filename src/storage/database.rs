//! Database Layer with Connection Pooling and Safe Transactions
//!
//! SQLite store for the `employees` table featuring:
//! - Connection pooling via r2d2; every unit of work acquires a pooled
//!   connection and releases it when the guard drops
//! - Panic-safe transactions with automatic rollback
//! - Version-tracked schema
//! - WAL mode for optimal read/write performance

use std::path::Path;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::constants::storage;
use crate::types::{HrError, Result, ResultExt};

const SCHEMA: &str = include_str!("schema.sql");

/// Current schema version
const SCHEMA_VERSION: u32 = 1;

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,
    /// Timeout for acquiring a connection (seconds)
    pub connection_timeout_secs: u64,
}

impl PoolConfig {
    pub fn with_max_size(max_size: u32) -> Self {
        Self {
            max_size: max_size.max(1),
            ..Self::default()
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: storage::DEFAULT_POOL_SIZE,
            connection_timeout_secs: storage::CONNECTION_TIMEOUT_SECS,
        }
    }
}

/// Pooled SQLite handle.
///
/// Passed explicitly to the stores that need it; there is no process-wide
/// connection.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open database with connection pooling at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, PoolConfig::default())
    }

    /// Open database with custom pool configuration.
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: PoolConfig) -> Result<Self> {
        let manager =
            SqliteConnectionManager::file(path.as_ref()).with_init(Self::configure_connection);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
            .build(manager)
            .map_err(|e| HrError::Storage(format!("Failed to create connection pool: {}", e)))?;

        Ok(Self { pool })
    }

    /// Open an in-memory database for testing or temporary use.
    ///
    /// The pool holds a single connection so every caller sees the same
    /// in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory();

        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| HrError::Storage(format!("Failed to create in-memory pool: {}", e)))?;

        Ok(Self { pool })
    }

    /// Configure a new connection with production-ready settings.
    fn configure_connection(conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA cache_size = -16000;
            PRAGMA busy_timeout = 5000;
            "#,
        )?;
        Ok(())
    }

    /// Get a connection from the pool.
    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| {
            HrError::Storage(format!("Failed to acquire database connection: {}", e))
        })
    }

    /// Initialize database schema.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA)
            .with_context("Failed to initialize database schema")?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)
            .with_context("Failed to set schema version")?;

        tracing::debug!("Database schema at version {}", SCHEMA_VERSION);
        Ok(())
    }

    /// Stored schema version (0 for a database that was never initialized).
    pub fn schema_version(&self) -> Result<u32> {
        let conn = self.conn()?;
        conn.pragma_query_value(None, "user_version", |row| row.get(0))
            .with_context("Failed to read schema version")
    }

    /// Get a raw connection for advanced operations.
    pub fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.conn()
    }

    /// Execute a single SQL statement.
    pub fn execute(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<usize> {
        let conn = self.conn()?;
        conn.execute(sql, params).with_context("Failed to execute SQL")
    }

    /// Execute a function within a panic-safe database transaction.
    ///
    /// All operations within the closure are atomic. If the closure panics,
    /// the transaction is automatically rolled back and an error is returned
    /// instead of poisoning the connection pool.
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + std::panic::UnwindSafe,
    {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .with_context("Failed to start transaction")?;

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(&tx)));

        match result {
            Ok(Ok(value)) => {
                tx.commit().with_context("Failed to commit transaction")?;
                Ok(value)
            }
            // Rolled back when `tx` drops
            Ok(Err(e)) => Err(e),
            Err(panic_payload) => {
                let panic_msg = panic_payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic_payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "Unknown panic".to_string());

                tracing::error!("Transaction panicked: {}", panic_msg);
                Err(HrError::Storage(format!(
                    "Transaction panicked: {}",
                    panic_msg
                )))
            }
        }
    }
}
