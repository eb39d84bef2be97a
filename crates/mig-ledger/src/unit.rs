//! Migration units: user-authored forward/reverse procedures.
//!
//! One capability interface for every unit shape, and an explicit lookup
//! from a ledger timestamp to its loaded unit — a unit is only ever found
//! through [`resolve`], never through name synthesis at run time.

use crate::error::{LedgerError, LedgerResult};
use chrono::NaiveDateTime;
use duckdb::Connection;
use mig_core::timestamp;
use std::path::{Path, PathBuf};

/// Section marker opening the forward procedure.
pub const UP_MARKER: &str = "-- migrate:up";
/// Section marker opening the reverse procedure.
pub const DOWN_MARKER: &str = "-- migrate:down";

/// A reversible migration unit.
///
/// Bodies are opaque, user-authored procedures; the engine only cares that
/// they run to completion inside the caller's transaction.
pub trait MigrationUnit {
    /// Run the forward procedure.
    fn apply(&self, conn: &Connection) -> LedgerResult<()>;

    /// Run the reverse procedure.
    fn revert(&self, conn: &Connection) -> LedgerResult<()>;
}

/// SQL migration unit loaded from a `-- migrate:up` / `-- migrate:down`
/// sectioned file.
#[derive(Debug, Clone)]
pub struct SqlUnit {
    path: PathBuf,
    up_sql: String,
    down_sql: String,
}

impl SqlUnit {
    /// Load and section a migration file.
    ///
    /// A file without an `-- migrate:up` marker is malformed. The down
    /// section is optional; reverting a unit without one is a no-op apart
    /// from the ledger flag update.
    pub fn load(path: &Path) -> LedgerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LedgerError::MalformedUnit {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let (up_sql, down_sql) =
            split_sections(&content).ok_or_else(|| LedgerError::MalformedUnit {
                path: path.display().to_string(),
                message: format!("missing '{UP_MARKER}' section"),
            })?;
        Ok(SqlUnit {
            path: path.to_path_buf(),
            up_sql,
            down_sql,
        })
    }

    /// Path this unit was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MigrationUnit for SqlUnit {
    fn apply(&self, conn: &Connection) -> LedgerResult<()> {
        conn.execute_batch(&self.up_sql)
            .map_err(|e| LedgerError::ExecutionError(format!("{}: {e}", self.path.display())))
    }

    fn revert(&self, conn: &Connection) -> LedgerResult<()> {
        conn.execute_batch(&self.down_sql)
            .map_err(|e| LedgerError::ExecutionError(format!("{}: {e}", self.path.display())))
    }
}

/// Deterministic lookup from a ledger timestamp to its unit.
///
/// Returns `Ok(None)` when the backing file is missing — the caller decides
/// whether that skips the entry or aborts.
pub fn resolve(migrations_dir: &Path, ts: NaiveDateTime) -> LedgerResult<Option<SqlUnit>> {
    let path = migrations_dir.join(timestamp::filename_from_timestamp(ts));
    if !path.is_file() {
        return Ok(None);
    }
    SqlUnit::load(&path).map(Some)
}

/// Split file content at the section markers.
///
/// Returns `None` when the up marker is absent. Text before the up marker
/// (comments, headers) is ignored.
fn split_sections(content: &str) -> Option<(String, String)> {
    enum Section {
        Preamble,
        Up,
        Down,
    }

    let mut up = String::new();
    let mut down = String::new();
    let mut section = Section::Preamble;
    let mut saw_up = false;

    for line in content.lines() {
        match line.trim() {
            UP_MARKER => {
                saw_up = true;
                section = Section::Up;
            }
            DOWN_MARKER => section = Section::Down,
            _ => match section {
                Section::Preamble => {}
                Section::Up => {
                    up.push_str(line);
                    up.push('\n');
                }
                Section::Down => {
                    down.push_str(line);
                    down.push('\n');
                }
            },
        }
    }

    if saw_up {
        Some((up, down))
    } else {
        None
    }
}

#[cfg(test)]
#[path = "unit_test.rs"]
mod tests;
