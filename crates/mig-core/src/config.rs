//! Configuration types and parsing for mig.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main project configuration from mig.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing migration SQL files
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,

    /// Name of the ledger table tracking known migrations
    #[serde(default = "default_ledger_table")]
    pub ledger_table: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// DuckDB (default)
    #[default]
    DuckDb,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Path to the database file (":memory:" for in-memory)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            db_type: DbType::default(),
            path: default_db_path(),
        }
    }
}

fn default_migrations_path() -> String {
    "migrations".to_string()
}

fn default_ledger_table() -> String {
    "migration_ledger".to_string()
}

fn default_db_path() -> String {
    "mig.duckdb".to_string()
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The ledger table name ends up interpolated into SQL (identifiers
    /// cannot be bound as parameters), so it is checked exactly once here.
    pub fn validate(&self) -> CoreResult<()> {
        if !is_valid_identifier(&self.ledger_table) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "ledger_table '{}' is not a valid SQL identifier",
                    self.ledger_table
                ),
            });
        }
        if self.migrations_path.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_path must not be empty".to_string(),
            });
        }
        if self.database.path.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute path of the migrations directory under `project_root`.
    pub fn migrations_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.migrations_path)
    }

    /// Absolute path of the database file under `project_root`.
    ///
    /// `:memory:` is passed through untouched.
    pub fn database_path(&self, project_root: &Path) -> PathBuf {
        if self.database.path == ":memory:" {
            PathBuf::from(":memory:")
        } else {
            project_root.join(&self.database.path)
        }
    }
}

/// Check that `name` is a bare SQL identifier: ASCII letter or underscore
/// first, then letters, digits, and underscores.
fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
