//! Migration ledger engine for mig.
//!
//! Owns the persistent ledger table that records which migration units are
//! known and which have been applied, and the machinery around it:
//! reconciliation against on-disk files, planning the ordered pending set
//! for a target, transactional execution of single units, and the single
//! "current" pointer.

pub mod connection;
pub mod current;
pub mod ddl;
pub mod entry;
pub mod error;
pub mod plan;
pub mod reconcile;
pub mod runner;
pub mod unit;

pub use connection::LedgerDb;
pub use entry::LedgerEntry;
pub use error::{LedgerError, LedgerResult};
pub use plan::Direction;
pub use runner::{BatchReport, RunOutcome};
