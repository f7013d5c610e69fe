//! Database connection management.
//!
//! Wraps the single rusqlite Connection opened for the process lifetime.
//! Configures PRAGMAs and runs migrations on initialization.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, Transaction};
use tracing::{debug, info};

use snippets_core::error::SnippetsError;

use crate::migrations;

/// SQLite database wrapper.
///
/// The connection lives behind a Mutex so `Arc<Database>` can be shared;
/// the tool itself only ever issues one statement at a time.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a database at the given path.
    ///
    /// Configures WAL mode and case-sensitive LIKE, and runs all pending
    /// migrations.
    pub fn new(path: &Path) -> Result<Self, SnippetsError> {
        // Ensure parent directory exists.
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        debug!("Connecting to database at {}", path.display());
        let conn = Connection::open(path)
            .map_err(|e| SnippetsError::Storage(format!("Failed to open database: {}", e)))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA case_sensitive_like = ON;",
        )
        .map_err(|e| SnippetsError::Storage(format!("Failed to set pragmas: {}", e)))?;

        info!("Database connection established at {}", path.display());

        Self::with_migrations(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, SnippetsError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SnippetsError::Storage(format!("Failed to open in-memory db: {}", e)))?;

        conn.execute_batch("PRAGMA case_sensitive_like = ON;")
            .map_err(|e| SnippetsError::Storage(format!("Failed to set pragmas: {}", e)))?;

        Self::with_migrations(conn)
    }

    fn with_migrations(conn: Connection) -> Result<Self, SnippetsError> {
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.with_conn(migrations::run_migrations)?;
        Ok(db)
    }

    /// Execute a closure with a reference to the underlying connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, SnippetsError>
    where
        F: FnOnce(&Connection) -> Result<T, SnippetsError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SnippetsError::Storage(format!("Database lock poisoned: {}", e)))?;
        f(&conn)
    }

    /// Execute a closure inside a transaction.
    ///
    /// Commits when the closure returns `Ok`. On `Err` the transaction is
    /// dropped uncommitted, which rolls it back.
    pub fn with_transaction<F, T>(&self, f: F) -> Result<T, SnippetsError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, SnippetsError>,
    {
        self.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| SnippetsError::Storage(format!("Failed to begin transaction: {}", e)))?;
            let value = f(&tx)?;
            tx.commit()
                .map_err(|e| SnippetsError::Storage(format!("Failed to commit transaction: {}", e)))?;
            Ok(value)
        })
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}
