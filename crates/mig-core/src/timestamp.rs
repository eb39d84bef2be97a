//! Timestamp ordering keys and their filename form.
//!
//! Migration files are named `YYYY_MM_DD_HH_MM_SS.sql`; the same instant is
//! stored in the ledger as a `TIMESTAMP` and rendered in SQL text as
//! `YYYY-MM-DD HH:MM:SS`.

use chrono::NaiveDateTime;

/// Filename stem format for migration files.
const FILENAME_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// SQL text format for ledger timestamps.
const SQL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Extension for migration files.
pub const MIGRATION_EXT: &str = "sql";

/// Parse the ordering key out of a migration filename.
///
/// Returns `None` for anything that does not match the
/// `YYYY_MM_DD_HH_MM_SS.sql` pattern; non-matching files are not errors,
/// they are simply not migrations.
pub fn timestamp_from_filename(filename: &str) -> Option<NaiveDateTime> {
    let stem = filename.strip_suffix(&format!(".{MIGRATION_EXT}"))?;
    NaiveDateTime::parse_from_str(stem, FILENAME_FORMAT).ok()
}

/// Render the migration filename for a ledger timestamp.
pub fn filename_from_timestamp(ts: NaiveDateTime) -> String {
    format!("{}.{}", ts.format(FILENAME_FORMAT), MIGRATION_EXT)
}

/// Render a timestamp in the SQL text form used for bound parameters.
pub fn to_sql_text(ts: NaiveDateTime) -> String {
    ts.format(SQL_FORMAT).to_string()
}

/// Parse a timestamp read back from the database.
///
/// DuckDB prints fractional seconds only when non-zero, so the format
/// accepts an optional fraction.
pub fn from_sql_text(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").ok()
}

#[cfg(test)]
#[path = "timestamp_test.rs"]
mod tests;
