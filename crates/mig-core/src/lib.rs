//! mig-core - Core library for mig
//!
//! This crate provides shared types, configuration parsing, timestamp key
//! handling, and migration file discovery used across all mig components.

pub mod config;
pub mod error;
pub mod scan;
pub mod timestamp;

pub use config::{Config, DbType};
pub use error::{CoreError, CoreResult};
pub use scan::{MigrationFile, Scanner, SortOrder};
