//! Ledger database connection wrapper.
//!
//! [`LedgerDb`] owns a DuckDB [`Connection`] and provides helpers for
//! opening, transacting, and creating the ledger table. Single-threaded —
//! one invocation processes one operation start to finish.

use crate::ddl::ledger_ddl;
use crate::error::{LedgerError, LedgerResult};
use duckdb::Connection;
use std::path::Path;

/// Wrapper around a DuckDB connection holding the migration ledger.
///
/// The ledger and the migrated schema live in the same database, so unit
/// procedures and ledger flag updates can share one transaction.
pub struct LedgerDb {
    conn: Connection,
    table: String,
}

impl LedgerDb {
    /// Open (or create) the database file at `path`.
    ///
    /// Does not create the ledger table; see [`LedgerDb::ensure_ledger`].
    /// `table` must already be validated as a bare identifier
    /// (`mig_core::Config::load` does this).
    pub fn open(path: &Path, table: &str) -> LedgerResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| LedgerError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    /// Create an in-memory database with the ledger table already created.
    ///
    /// Useful for unit tests that don't need persistence.
    pub fn open_memory(table: &str) -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| LedgerError::ConnectionError(e.to_string()))?;
        let db = Self {
            conn,
            table: table.to_string(),
        };
        db.ensure_ledger()?;
        Ok(db)
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Name of the ledger table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Check whether the ledger table exists in this database.
    pub fn ledger_exists(&self) -> LedgerResult<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_schema = 'main' AND table_name = ?",
                duckdb::params![self.table],
                |row| row.get(0),
            )
            .map_err(|e| LedgerError::QueryError(e.to_string()))?;
        Ok(count > 0)
    }

    /// Idempotently create the ledger table and its id sequence.
    pub fn ensure_ledger(&self) -> LedgerResult<()> {
        self.conn
            .execute_batch(&ledger_ddl(&self.table))
            .map_err(|e| {
                LedgerError::ConnectionError(format!("failed to create ledger table: {e}"))
            })?;
        Ok(())
    }

    /// Error if the ledger table has not been created yet.
    pub fn require_ledger(&self) -> LedgerResult<()> {
        if self.ledger_exists()? {
            Ok(())
        } else {
            Err(LedgerError::LedgerMissing(self.table.clone()))
        }
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back
    /// on error.
    pub fn transaction<F, T>(&self, body: F) -> LedgerResult<T>
    where
        F: FnOnce(&Connection) -> LedgerResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| LedgerError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(LedgerError::TransactionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                let _ = self.conn.execute_batch("ROLLBACK");
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
