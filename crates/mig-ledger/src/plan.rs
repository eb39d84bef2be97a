//! Pending-migration planning.

use crate::connection::LedgerDb;
use crate::entry::{self, LedgerEntry};
use crate::error::{LedgerError, LedgerResult};
use mig_core::timestamp;
use std::fmt;

/// Migration direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply forward procedures
    Up,
    /// Apply reverse procedures
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Compute the ordered pending set for `target_id`.
///
/// Up: inactive entries at or before the target, oldest first.
/// Down: active entries strictly after the target, newest first.
/// An empty plan means nothing is pending; it is not an error.
pub fn plan(db: &LedgerDb, target_id: i64, direction: Direction) -> LedgerResult<Vec<LedgerEntry>> {
    let target_ts = entry::timestamp_for_id(db, target_id)?;
    let ts_text = timestamp::to_sql_text(target_ts);

    let sql = match direction {
        Direction::Up => format!(
            "SELECT {} FROM {} \
             WHERE active = false AND timestamp <= CAST(? AS TIMESTAMP) \
             ORDER BY timestamp",
            entry::entry_columns(),
            db.table()
        ),
        Direction::Down => format!(
            "SELECT {} FROM {} \
             WHERE active = true AND timestamp > CAST(? AS TIMESTAMP) \
             ORDER BY timestamp DESC",
            entry::entry_columns(),
            db.table()
        ),
    };

    let mut stmt = db
        .conn()
        .prepare(&sql)
        .map_err(|e| LedgerError::QueryError(e.to_string()))?;
    let rows = stmt
        .query_map(duckdb::params![ts_text], entry::map_entry)
        .map_err(|e| LedgerError::QueryError(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| LedgerError::QueryError(e.to_string()))
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
