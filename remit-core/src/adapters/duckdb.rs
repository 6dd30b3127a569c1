//! DuckDB data source - the connection factory behind every store call

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use duckdb::Connection;
use tracing::{debug, warn};

use crate::domain::result::Result;
use crate::migrations::MIGRATIONS;
use crate::ports::{ConnectionFactory, Executor};

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400, 800ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

/// DuckDB-backed connection factory
///
/// Holds one root connection to the database instance. Every `connect()`
/// clones it into an independent connection on the same instance, so each
/// caller gets its own transaction scope while in-memory databases stay
/// shared between connections.
pub struct DuckDbDataSource {
    root: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl DuckDbDataSource {
    /// Open (or create) a database file
    ///
    /// Retries with exponential backoff when the file is locked by another
    /// process.
    pub fn open(db_path: &Path) -> Result<Self> {
        let mut attempt = 0;
        loop {
            match Self::try_open_connection(Some(db_path)) {
                Ok(conn) => {
                    return Ok(Self {
                        root: Mutex::new(conn),
                        db_path: Some(db_path.to_path_buf()),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if !is_retryable_error(&err_msg) || attempt + 1 >= MAX_RETRIES {
                        return Err(e);
                    }
                    let delay = Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                    warn!(
                        delay_ms = delay.as_millis() as u64,
                        attempt = attempt + 1,
                        max = MAX_RETRIES,
                        error = %err_msg,
                        "database busy, retrying"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Self::try_open_connection(None)?;
        Ok(Self {
            root: Mutex::new(conn),
            db_path: None,
        })
    }

    fn try_open_connection(db_path: Option<&Path>) -> Result<Connection> {
        // Extension autoloading stays off; nothing here needs an extension
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = match db_path {
            Some(path) => Connection::open_with_flags(path, config)?,
            None => Connection::open_in_memory_with_flags(config)?,
        };
        Ok(conn)
    }

    /// Path of the database file, `None` for in-memory databases
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Create any missing tables
    ///
    /// Every script is idempotent, so this is safe on each open.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        for (name, sql) in MIGRATIONS {
            conn.execute_batch(sql)?;
            debug!(script = *name, "schema script applied");
        }
        Ok(())
    }
}

impl ConnectionFactory for DuckDbDataSource {
    fn connect(&self) -> Result<Connection> {
        // The root connection is only ever cloned, so a poisoned lock
        // leaves nothing half-updated behind.
        let root = self.root.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(root.try_clone()?)
    }
}

impl Executor for DuckDbDataSource {
    fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.connect()?;
        f(&conn)
    }
}
