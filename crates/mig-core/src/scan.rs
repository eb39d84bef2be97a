//! Migration file discovery.
//!
//! The scanner lists migration units present on disk and extracts each
//! unit's ordering key from its filename. Files that do not match the
//! timestamp naming pattern (templates, notes, anything else) are silently
//! skipped.

use crate::error::{CoreError, CoreResult};
use crate::timestamp;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Sort order for scanned migration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest timestamp first
    Ascending,
    /// Newest timestamp first
    Descending,
}

/// A migration unit present on disk.
///
/// Derived from directory state on every scan; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Ordering key parsed from the filename
    pub timestamp: NaiveDateTime,
    /// Bare filename, e.g. `2024_01_02_03_04_05.sql`
    pub filename: String,
    /// Full path to the file
    pub path: PathBuf,
}

/// Lists migration files under a single directory.
///
/// Restartable: every call to [`Scanner::files`] rescans the directory, so
/// the result always reflects current disk state.
#[derive(Debug, Clone)]
pub struct Scanner {
    dir: PathBuf,
}

impl Scanner {
    pub fn new(dir: &Path) -> Self {
        Scanner {
            dir: dir.to_path_buf(),
        }
    }

    /// Directory this scanner reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Scan the directory and return matching files in the requested order.
    pub fn files(&self, order: SortOrder) -> CoreResult<Vec<MigrationFile>> {
        if !self.dir.is_dir() {
            return Err(CoreError::MigrationsDirNotFound {
                path: self.dir.display().to_string(),
            });
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| CoreError::ScanError {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CoreError::ScanError {
                path: self.dir.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let filename = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            match timestamp::timestamp_from_filename(&filename) {
                Some(ts) => files.push(MigrationFile {
                    timestamp: ts,
                    filename,
                    path,
                }),
                None => {
                    log::debug!("Skipping non-migration file: {filename}");
                }
            }
        }

        files.sort_by_key(|f| f.timestamp);
        if order == SortOrder::Descending {
            files.reverse();
        }
        Ok(files)
    }
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
