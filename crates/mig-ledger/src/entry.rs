//! Ledger entry type and row queries.

use crate::connection::LedgerDb;
use crate::error::{LedgerError, LedgerResult};
use chrono::NaiveDateTime;
use mig_core::timestamp;

/// One row of the ledger table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Sequence-assigned numeric id
    pub id: i64,
    /// Ordering key, unique across the ledger
    pub timestamp: NaiveDateTime,
    /// Forward procedure applied and not yet reverted
    pub active: bool,
    /// This entry is the most recently completed forward target
    pub is_current: bool,
}

/// Column list used by every entry SELECT.
///
/// The timestamp is read back through `CAST(... AS VARCHAR)` so row mapping
/// stays on plain string parsing instead of driver-specific datetime types.
pub(crate) fn entry_columns() -> &'static str {
    "id, CAST(timestamp AS VARCHAR), active, is_current"
}

pub(crate) fn map_entry(row: &duckdb::Row<'_>) -> Result<LedgerEntry, duckdb::Error> {
    let ts_text: String = row.get(1)?;
    let ts = timestamp::from_sql_text(&ts_text).ok_or_else(|| {
        duckdb::Error::FromSqlConversionFailure(
            1,
            duckdb::types::Type::Text,
            format!("unparseable ledger timestamp: {ts_text}").into(),
        )
    })?;
    Ok(LedgerEntry {
        id: row.get(0)?,
        timestamp: ts,
        active: row.get(2)?,
        is_current: row.get(3)?,
    })
}

/// Fetch a single entry by id.
pub fn get_entry(db: &LedgerDb, id: i64) -> LedgerResult<Option<LedgerEntry>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?",
        entry_columns(),
        db.table()
    );
    let mut stmt = db
        .conn()
        .prepare(&sql)
        .map_err(|e| LedgerError::QueryError(e.to_string()))?;
    let mut rows = stmt
        .query_map(duckdb::params![id], map_entry)
        .map_err(|e| LedgerError::QueryError(e.to_string()))?;
    match rows.next() {
        Some(row) => Ok(Some(
            row.map_err(|e| LedgerError::QueryError(e.to_string()))?,
        )),
        None => Ok(None),
    }
}

/// Resolve a ledger id to its timestamp, or `NotFound`.
pub fn timestamp_for_id(db: &LedgerDb, id: i64) -> LedgerResult<NaiveDateTime> {
    match get_entry(db, id)? {
        Some(entry) => Ok(entry.timestamp),
        None => Err(LedgerError::NotFound(id)),
    }
}

/// Full ledger listing ordered by timestamp, with LIMIT/OFFSET pagination.
///
/// A non-positive `limit` returns everything.
pub fn full_list(db: &LedgerDb, offset: i64, limit: i64) -> LedgerResult<Vec<LedgerEntry>> {
    let mut sql = format!(
        "SELECT {} FROM {} ORDER BY timestamp",
        entry_columns(),
        db.table()
    );
    if limit > 0 {
        sql.push_str(" LIMIT ? OFFSET ?");
    }
    let mut stmt = db
        .conn()
        .prepare(&sql)
        .map_err(|e| LedgerError::QueryError(e.to_string()))?;
    let rows = if limit > 0 {
        stmt.query_map(duckdb::params![limit, offset], map_entry)
    } else {
        stmt.query_map([], map_entry)
    }
    .map_err(|e| LedgerError::QueryError(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| LedgerError::QueryError(e.to_string()))
}

/// Total number of ledger entries.
pub fn count(db: &LedgerDb) -> LedgerResult<i64> {
    db.conn()
        .query_row(
            &format!("SELECT COUNT(*) FROM {}", db.table()),
            [],
            |row| row.get(0),
        )
        .map_err(|e| LedgerError::QueryError(e.to_string()))
}

#[cfg(test)]
#[path = "entry_test.rs"]
mod tests;
