//! Error types for mig-core

use thiserror::Error;

/// Core error type for mig
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: Migrations directory not found
    #[error("[C004] Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: String },

    /// C005: Failed to read the migrations directory
    #[error("[C005] Failed to scan migrations in {path}: {source}")]
    ScanError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// C006: IO error
    #[error("[C006] IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
