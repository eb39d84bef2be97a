//! The single "current" pointer.
//!
//! Exactly one ledger row may carry `is_current` at any time. The pointer
//! moves only after a forward batch completes; reverse batches and single
//! runs never touch it.

use crate::connection::LedgerDb;
use crate::entry::{self, LedgerEntry};
use crate::error::{LedgerError, LedgerResult};

/// Move the current pointer to `id` in one transaction.
///
/// Clears the flag everywhere, then sets it on the target row. Fails with
/// `NotFound` (and rolls back) if the id is not in the ledger, so the
/// clear-all never commits on its own.
pub fn set_current(db: &LedgerDb, id: i64) -> LedgerResult<()> {
    let clear_sql = format!("UPDATE {} SET is_current = false", db.table());
    let set_sql = format!("UPDATE {} SET is_current = true WHERE id = ?", db.table());

    db.transaction(|conn| {
        conn.execute(&clear_sql, [])
            .map_err(|e| LedgerError::QueryError(e.to_string()))?;
        let updated = conn
            .execute(&set_sql, duckdb::params![id])
            .map_err(|e| LedgerError::QueryError(e.to_string()))?;
        if updated == 0 {
            return Err(LedgerError::NotFound(id));
        }
        Ok(())
    })
}

/// The entry the pointer currently marks, if any.
pub fn current_entry(db: &LedgerDb) -> LedgerResult<Option<LedgerEntry>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE is_current = true",
        entry::entry_columns(),
        db.table()
    );
    let mut stmt = db
        .conn()
        .prepare(&sql)
        .map_err(|e| LedgerError::QueryError(e.to_string()))?;
    let mut rows = stmt
        .query_map([], entry::map_entry)
        .map_err(|e| LedgerError::QueryError(e.to_string()))?;
    match rows.next() {
        Some(row) => Ok(Some(
            row.map_err(|e| LedgerError::QueryError(e.to_string()))?,
        )),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "current_test.rs"]
mod tests;
