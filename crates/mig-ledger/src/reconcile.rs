//! Ledger reconciliation against on-disk migration files.
//!
//! Runs before any planning or execution. Two independent transactional
//! phases: insert unseen file timestamps, then prune orphaned rows that
//! were never applied. Either phase failing rolls that phase back and is
//! fatal to the invocation.

use crate::connection::LedgerDb;
use crate::entry;
use crate::error::{LedgerError, LedgerResult};
use chrono::NaiveDateTime;
use mig_core::scan::MigrationFile;
use mig_core::timestamp;
use std::collections::HashSet;

/// Write counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileStats {
    /// New ledger rows created for previously unseen files
    pub inserted: usize,
    /// Orphaned, never-applied rows deleted
    pub pruned: usize,
}

/// Merge scanned migration files into the ledger.
///
/// Reconciling twice with no filesystem change performs zero writes on the
/// second pass.
pub fn reconcile(db: &LedgerDb, files: &[MigrationFile]) -> LedgerResult<ReconcileStats> {
    let mut stats = ReconcileStats::default();

    // Insert phase: one row per file timestamp not yet in the ledger.
    // Timestamp collisions with concurrent inserts are ignored, not errors.
    if !files.is_empty() {
        let sql = format!(
            "INSERT OR IGNORE INTO {} (timestamp, active, is_current) \
             VALUES (CAST(? AS TIMESTAMP), false, false)",
            db.table()
        );
        stats.inserted = db.transaction(|conn| {
            let mut inserted = 0;
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| LedgerError::ReconciliationError(e.to_string()))?;
            for file in files {
                inserted += stmt
                    .execute(duckdb::params![timestamp::to_sql_text(file.timestamp)])
                    .map_err(|e| {
                        LedgerError::ReconciliationError(format!(
                            "insert for {} failed: {e}",
                            file.filename
                        ))
                    })?;
            }
            Ok(inserted)
        })?;
    }

    // Prune phase: rows with no backing file are transient while inactive.
    // An active row's effect is already in the schema, so it stays.
    let file_timestamps: HashSet<NaiveDateTime> = files.iter().map(|f| f.timestamp).collect();
    let db_list = entry::full_list(db, 0, 0)?;
    let orphans: Vec<i64> = db_list
        .iter()
        .filter(|e| !e.active && !file_timestamps.contains(&e.timestamp))
        .map(|e| e.id)
        .collect();

    if !orphans.is_empty() {
        let sql = format!("DELETE FROM {} WHERE id = ?", db.table());
        stats.pruned = db.transaction(|conn| {
            let mut pruned = 0;
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| LedgerError::ReconciliationError(e.to_string()))?;
            for id in &orphans {
                pruned += stmt.execute(duckdb::params![id]).map_err(|e| {
                    LedgerError::ReconciliationError(format!("prune of id {id} failed: {e}"))
                })?;
            }
            Ok(pruned)
        })?;
    }

    log::debug!(
        "Reconciled ledger: {} inserted, {} pruned",
        stats.inserted,
        stats.pruned
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
