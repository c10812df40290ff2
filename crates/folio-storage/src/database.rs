// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All statements run on tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use folio_config::FolioConfig;
use folio_core::FolioError;
use tracing::{debug, info};

use crate::migrations;

/// Path that selects a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// How to open the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseOptions {
    pub path: String,
    /// Use the write-ahead log (ignored for in-memory databases).
    pub wal_mode: bool,
    /// Log every SQL statement at debug level.
    pub echo_sql: bool,
}

impl DatabaseOptions {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            wal_mode: true,
            echo_sql: false,
        }
    }

    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            path: config.database_path(),
            wal_mode: config.storage.wal_mode,
            echo_sql: config.echo_sql(),
        }
    }

    fn is_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }
}

/// Convert a tokio-rusqlite error into FolioError::Storage.
pub(crate) fn map_tr_err<E>(e: tokio_rusqlite::Error<E>) -> FolioError
where
    E: std::error::Error + Send + Sync + 'static,
{
    FolioError::Storage {
        source: Box::new(e),
    }
}

/// A migrated SQLite database behind a single background connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
    path: String,
    echo_sql: bool,
}

impl Database {
    /// Open (creating if needed) the database at `path` with default options.
    pub async fn open(path: &str) -> Result<Self, FolioError> {
        Self::open_with(&DatabaseOptions::new(path)).await
    }

    /// Open the database, apply PRAGMAs, and run pending migrations.
    pub async fn open_with(options: &DatabaseOptions) -> Result<Self, FolioError> {
        let conn = if options.is_memory() {
            tokio_rusqlite::Connection::open_in_memory().await
        } else {
            tokio_rusqlite::Connection::open(&options.path).await
        }
        .map_err(|e| FolioError::Storage {
            source: Box::new(e),
        })?;

        let wal = options.wal_mode && !options.is_memory();
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal {
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(migrations::run_migrations)
            .await
            .map_err(map_tr_err)?;

        info!(path = %options.path, wal, "database opened");
        Ok(Self {
            conn,
            path: options.path.clone(),
            echo_sql: options.echo_sql,
        })
    }

    /// The background connection all queries go through.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Logs `sql` when statement echo is enabled.
    pub fn echo(&self, sql: &str) {
        if self.echo_sql {
            debug!(target: "folio_storage::sql", sql = sql.trim(), "executing statement");
        }
    }

    /// Flush the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), FolioError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!(path = %self.path, "WAL checkpoint complete");
        Ok(())
    }
}
