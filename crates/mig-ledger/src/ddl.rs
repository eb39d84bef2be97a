//! DDL for the ledger table.
//!
//! The table name is configurable and validated at configuration load time,
//! so it is the only identifier ever interpolated into SQL text. DuckDB has
//! no AUTO_INCREMENT; a companion sequence feeds the `id` column.

/// Render the idempotent CREATE statements for the ledger table.
pub fn ledger_ddl(table: &str) -> String {
    format!(
        "CREATE SEQUENCE IF NOT EXISTS {table}_id_seq;
         CREATE TABLE IF NOT EXISTS {table} (
             id         INTEGER PRIMARY KEY DEFAULT nextval('{table}_id_seq'),
             timestamp  TIMESTAMP NOT NULL UNIQUE,
             active     BOOLEAN NOT NULL DEFAULT false,
             is_current BOOLEAN NOT NULL DEFAULT false
         );"
    )
}
