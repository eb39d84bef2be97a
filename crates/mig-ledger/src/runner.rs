//! Transactional execution of planned migration entries.
//!
//! `run_one` executes a single entry: the unit's procedure and its ledger
//! flag update share one transaction, so a failing migration leaves no
//! trace. `run_batch` is the halt-vs-continue policy point: strict mode
//! stops at the first failure, forced mode records it and moves on.

use crate::connection::LedgerDb;
use crate::entry::LedgerEntry;
use crate::error::{LedgerError, LedgerResult};
use crate::plan::Direction;
use crate::unit::{self, MigrationUnit};
use mig_core::timestamp;
use std::path::Path;

/// Terminal state of one entry for one invocation.
#[derive(Debug)]
pub enum RunOutcome {
    /// Forward procedure committed, `active` now true
    Applied,
    /// Reverse procedure committed, `active` now false
    Reverted,
    /// Backing file missing; entry skipped, ledger untouched
    SkippedMissingFile,
    /// Procedure or flag update failed; transaction rolled back
    Failed(LedgerError),
}

impl RunOutcome {
    /// True for the two committed outcomes.
    pub fn succeeded(&self) -> bool {
        matches!(self, RunOutcome::Applied | RunOutcome::Reverted)
    }
}

/// Per-entry results of a batch, in execution order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One result per attempted entry
    pub results: Vec<(LedgerEntry, RunOutcome)>,
    /// A strict-mode failure stopped the batch before completion
    pub halted: bool,
}

impl BatchReport {
    /// Id of the last entry whose transaction committed.
    pub fn last_succeeded(&self) -> Option<i64> {
        self.results
            .iter()
            .rev()
            .find(|(_, outcome)| outcome.succeeded())
            .map(|(entry, _)| entry.id)
    }

    /// Number of entries that ended in `Failed`.
    pub fn failure_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, o)| matches!(o, RunOutcome::Failed(_)))
            .count()
    }
}

/// Execute one entry's forward or reverse procedure.
///
/// The ledger is only touched inside the transaction that also runs the
/// procedure; on any failure the rollback restores both.
pub fn run_one(
    db: &LedgerDb,
    migrations_dir: &Path,
    entry: &LedgerEntry,
    direction: Direction,
) -> LedgerResult<RunOutcome> {
    let unit = match unit::resolve(migrations_dir, entry.timestamp) {
        Ok(Some(unit)) => unit,
        Ok(None) => {
            log::warn!(
                "Migration {} (ID {}) skipped - file missing",
                timestamp::to_sql_text(entry.timestamp),
                entry.id
            );
            return Ok(RunOutcome::SkippedMissingFile);
        }
        Err(e) => return Ok(RunOutcome::Failed(e)),
    };

    log::debug!(
        "Performing {} migration {} (ID {})",
        direction,
        timestamp::to_sql_text(entry.timestamp),
        entry.id
    );

    let active = direction == Direction::Up;
    let flag_sql = format!("UPDATE {} SET active = ? WHERE id = ?", db.table());
    let result = db.transaction(|conn| {
        match direction {
            Direction::Up => unit.apply(conn)?,
            Direction::Down => unit.revert(conn)?,
        }
        conn.execute(&flag_sql, duckdb::params![active, entry.id])
            .map_err(|e| LedgerError::ExecutionError(format!("flag update failed: {e}")))?;
        Ok(())
    });

    match result {
        Ok(()) => Ok(match direction {
            Direction::Up => RunOutcome::Applied,
            Direction::Down => RunOutcome::Reverted,
        }),
        // Transaction plumbing failures are infrastructure errors, not a
        // failure of this unit.
        Err(e @ LedgerError::TransactionError(_)) => Err(e),
        Err(e) => Ok(RunOutcome::Failed(e)),
    }
}

/// Execute a planned batch in order.
///
/// `forced` converts per-entry execution failures from fatal into
/// record-and-continue; missing files are always skip-and-continue.
pub fn run_batch(
    db: &LedgerDb,
    migrations_dir: &Path,
    plan: &[LedgerEntry],
    direction: Direction,
    forced: bool,
) -> LedgerResult<BatchReport> {
    let mut report = BatchReport::default();

    for entry in plan {
        let outcome = run_one(db, migrations_dir, entry, direction)?;
        let failed = matches!(outcome, RunOutcome::Failed(_));
        report.results.push((entry.clone(), outcome));

        if failed && !forced {
            report.halted = true;
            break;
        }
    }

    Ok(report)
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
