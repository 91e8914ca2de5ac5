//! SQLite-based cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dart_core::{CorpCache, CorpCode, CorpEntry, DartError, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, instrument};

/// SQLite-based cache for the company reference table.
///
/// Stores the table in a SQLite database file, providing persistence across
/// application restarts. The table is always replaced wholesale inside one
/// transaction, together with its fetch timestamp.
#[derive(Debug)]
pub struct SqliteCorpCache {
    conn: Mutex<Connection>,
}

impl SqliteCorpCache {
    /// Create a new SQLite cache at the given path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| DartError::Cache(e.to_string()))?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory SQLite cache.
    ///
    /// Useful for testing; data is lost when the cache is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| DartError::Cache(e.to_string()))?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DartError::Cache(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS corp_table (
                corp_code TEXT NOT NULL PRIMARY KEY,
                corp_name TEXT NOT NULL,
                stock_code TEXT,
                listed INTEGER NOT NULL
            )",
            [],
        )
        .map_err(|e| DartError::Cache(e.to_string()))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_corp_table_name
             ON corp_table(corp_name)",
            [],
        )
        .map_err(|e| DartError::Cache(e.to_string()))?;

        // Single-row metadata table holding the fetch timestamp
        conn.execute(
            "CREATE TABLE IF NOT EXISTS corp_table_meta (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                fetched_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| DartError::Cache(e.to_string()))?;

        debug!("SQLite corp cache schema initialized");
        Ok(())
    }

    /// Read the fetch timestamp, if a table has been stored.
    fn fetched_at(conn: &Connection) -> Result<Option<DateTime<Utc>>> {
        let stamp: Option<String> = conn
            .query_row(
                "SELECT fetched_at FROM corp_table_meta WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DartError::Cache(e.to_string()))?;

        match stamp {
            Some(s) => {
                let parsed = DateTime::parse_from_rfc3339(&s)
                    .map_err(|e| DartError::Cache(format!("bad fetched_at timestamp: {e}")))?;
                Ok(Some(parsed.with_timezone(&Utc)))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CorpCache for SqliteCorpCache {
    #[instrument(skip(self))]
    async fn get(&self, now: DateTime<Utc>, ttl: Duration) -> Result<Option<Vec<CorpEntry>>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DartError::Cache(e.to_string()))?;

        let Some(fetched_at) = Self::fetched_at(&conn)? else {
            debug!("No cached corp table");
            return Ok(None);
        };

        let age = now.signed_duration_since(fetched_at);
        if age > chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX) {
            debug!(%fetched_at, "Cached corp table is stale");
            return Ok(None);
        }

        let mut stmt = conn
            .prepare(
                "SELECT corp_code, corp_name, stock_code, listed
                 FROM corp_table
                 ORDER BY corp_code ASC",
            )
            .map_err(|e| DartError::Cache(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, bool>(3)?,
                ))
            })
            .map_err(|e| DartError::Cache(e.to_string()))?;

        let mut entries = Vec::new();
        for row in rows {
            let (corp_code, corp_name, stock_code, listed) =
                row.map_err(|e| DartError::Cache(e.to_string()))?;
            entries.push(CorpEntry {
                corp_name,
                corp_code: CorpCode::new(corp_code),
                stock_code,
                listed,
            });
        }

        if entries.is_empty() {
            debug!("Cached corp table is empty");
            return Ok(None);
        }

        debug!("Found {} cached corp entries", entries.len());
        Ok(Some(entries))
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    async fn put(&self, entries: &[CorpEntry], now: DateTime<Utc>) -> Result<()> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DartError::Cache(e.to_string()))?;

        let tx = conn
            .transaction()
            .map_err(|e| DartError::Cache(e.to_string()))?;

        tx.execute("DELETE FROM corp_table", [])
            .map_err(|e| DartError::Cache(e.to_string()))?;

        for entry in entries {
            tx.execute(
                "INSERT OR REPLACE INTO corp_table (corp_code, corp_name, stock_code, listed)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    entry.corp_code.as_str(),
                    entry.corp_name,
                    entry.stock_code,
                    entry.listed,
                ],
            )
            .map_err(|e| DartError::Cache(e.to_string()))?;
        }

        tx.execute(
            "INSERT OR REPLACE INTO corp_table_meta (id, fetched_at) VALUES (1, ?1)",
            params![now.to_rfc3339()],
        )
        .map_err(|e| DartError::Cache(e.to_string()))?;

        tx.commit().map_err(|e| DartError::Cache(e.to_string()))?;

        debug!("Cached {} corp entries", entries.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DartError::Cache(e.to_string()))?;

        conn.execute("DELETE FROM corp_table", [])
            .map_err(|e| DartError::Cache(e.to_string()))?;
        conn.execute("DELETE FROM corp_table_meta", [])
            .map_err(|e| DartError::Cache(e.to_string()))?;

        debug!("Cleared corp table cache");
        Ok(())
    }
}
