//! Relational persistence with SQLite

use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::{FxError, Result};
use crate::store::RateRow;

/// Table holding every currency's windowed rows
pub const WINDOW_TABLE: &str = "rates_window";

/// Table holding the selected currency's base-100 scaled rows
pub const SCALED_TABLE: &str = "rates_scaled";

/// Rate database with SQLite backend
pub struct RateDb {
    conn: Connection,
}

impl RateDb {
    /// Create or open database at path
    pub fn new(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .map_err(|e| FxError::StorageError(format!("Failed to open database: {}", e)))?;
        Ok(Self { conn })
    }

    /// Create in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            FxError::StorageError(format!("Failed to create in-memory database: {}", e))
        })?;
        Ok(Self { conn })
    }

    /// Replace `table` wholesale with `rows`, mirroring the re-run semantics
    /// of the pipeline: any previous contents are dropped first.
    fn replace_table(&mut self, table: &str, rows: &[RateRow]) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| FxError::StorageError(format!("Failed to start transaction: {}", e)))?;

        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};
             CREATE TABLE {table} (
                currency TEXT NOT NULL,
                date TEXT NOT NULL,
                value REAL NOT NULL
             );"
        ))
        .map_err(|e| FxError::StorageError(format!("Failed to create table {}: {}", table, e)))?;

        {
            let mut stmt = tx
                .prepare(&format!(
                    "INSERT INTO {table} (currency, date, value) VALUES (?1, ?2, ?3)"
                ))
                .map_err(|e| FxError::StorageError(format!("Failed to prepare insert: {}", e)))?;

            for row in rows {
                stmt.execute(params![row.code, row.date, row.value])
                    .map_err(|e| {
                        FxError::StorageError(format!("Failed to insert into {}: {}", table, e))
                    })?;
            }
        }

        tx.commit()
            .map_err(|e| FxError::StorageError(format!("Failed to commit: {}", e)))
    }

    /// Store the full window table
    pub fn store_window(&mut self, rows: &[RateRow]) -> Result<()> {
        self.replace_table(WINDOW_TABLE, rows)
    }

    /// Store the single-currency scaled table
    pub fn store_scaled(&mut self, rows: &[RateRow]) -> Result<()> {
        self.replace_table(SCALED_TABLE, rows)
    }

    /// Row count of `table`; 0 if the table does not exist yet
    pub fn count(&self, table: &str) -> Result<usize> {
        let exists: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table],
                |row| row.get(0),
            )
            .map_err(|e| FxError::StorageError(format!("Failed to check table {}: {}", table, e)))?;
        if exists == 0 {
            return Ok(0);
        }

        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .map_err(|e| FxError::StorageError(format!("Failed to count {}: {}", table, e)))?;
        Ok(count as usize)
    }

    /// Read `table` back as rows, in insertion order
    pub fn rows(&self, table: &str) -> Result<Vec<RateRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT currency, date, value FROM {table} ORDER BY rowid"
            ))
            .map_err(|e| FxError::StorageError(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RateRow {
                    code: row.get(0)?,
                    date: row.get(1)?,
                    value: row.get(2)?,
                })
            })
            .map_err(|e| FxError::StorageError(format!("Failed to query {}: {}", table, e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| FxError::StorageError(format!("Failed to collect rows: {}", e)))?;

        Ok(rows)
    }
}
