//! Error types for the migration ledger.

use thiserror::Error;

/// Ledger engine errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to open the ledger database (L001).
    #[error("[L001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Ledger table is missing (L002).
    #[error("[L002] Ledger table '{0}' not found; run `mig recreate` first")]
    LedgerMissing(String),

    /// Insert or prune phase failed during reconciliation (L003).
    #[error("[L003] Ledger reconciliation failed: {0}")]
    ReconciliationError(String),

    /// Requested migration id is not in the ledger (L004).
    #[error("[L004] Migration {0} does not exist")]
    NotFound(i64),

    /// Migration file exists but cannot be used as a unit (L005).
    #[error("[L005] Malformed migration file {path}: {message}")]
    MalformedUnit { path: String, message: String },

    /// Forward or reverse procedure (or its flag update) failed (L006).
    #[error("[L006] Migration execution failed: {0}")]
    ExecutionError(String),

    /// Transaction management error (L007).
    #[error("[L007] Ledger transaction failed: {0}")]
    TransactionError(String),

    /// SQL query against the ledger failed (L008).
    #[error("[L008] Ledger query failed: {0}")]
    QueryError(String),
}

/// Result type alias for [`LedgerError`].
pub type LedgerResult<T> = Result<T, LedgerError>;
