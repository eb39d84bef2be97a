//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use mig_core::{timestamp, Config, Scanner, SortOrder};
use mig_ledger::reconcile::ReconcileStats;
use mig_ledger::{BatchReport, LedgerDb, RunOutcome};
use std::fmt;
use std::path::PathBuf;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: ExitCode is a control-flow mechanism, not a
        // user-facing error. The message has already been printed by the
        // command that raised it.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Loaded config, resolved project root, and an open ledger database.
pub(crate) struct CommandContext {
    pub config: Config,
    pub root: PathBuf,
    pub db: LedgerDb,
}

/// Load `mig.yml` from the project directory (or the `--config` override).
pub(crate) fn load_config(global: &GlobalArgs) -> Result<(Config, PathBuf)> {
    let root = PathBuf::from(&global.project_dir);
    let config_path = match &global.config {
        Some(path) => PathBuf::from(path),
        None => root.join("mig.yml"),
    };
    let config = Config::load(&config_path).context("Failed to load config")?;
    if global.verbose {
        eprintln!("[verbose] Config: {}", config_path.display());
    }
    Ok((config, root))
}

impl CommandContext {
    /// Load the project config and open the ledger database.
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let (config, root) = load_config(global)?;
        let db_path = config.database_path(&root);
        if global.verbose {
            eprintln!("[verbose] Database: {}", db_path.display());
        }
        let db = LedgerDb::open(&db_path, &config.ledger_table)
            .context("Failed to open database")?;
        Ok(CommandContext { config, root, db })
    }

    /// Absolute path of the migrations directory.
    pub fn migrations_dir(&self) -> PathBuf {
        self.config.migrations_dir(&self.root)
    }

    /// Scanner over the migrations directory.
    pub fn scanner(&self) -> Scanner {
        Scanner::new(&self.migrations_dir())
    }
}

/// Rescan the migrations directory and reconcile the ledger against it.
///
/// Every action command (`run`, `up`, `down`) calls this before planning,
/// so the ledger always reflects the files present at invocation time.
pub(crate) fn reconcile_ledger(ctx: &CommandContext, verbose: bool) -> Result<ReconcileStats> {
    ctx.db.require_ledger()?;
    let files = ctx.scanner().files(SortOrder::Ascending)?;
    let stats = mig_ledger::reconcile::reconcile(&ctx.db, &files)?;
    if verbose {
        eprintln!(
            "[verbose] Reconciled ledger: {} inserted, {} pruned",
            stats.inserted, stats.pruned
        );
    }
    Ok(stats)
}

/// Print one line per attempted batch entry.
pub(crate) fn print_report(report: &BatchReport) {
    for (entry, outcome) in &report.results {
        let label = match outcome {
            RunOutcome::Applied => "applied".to_string(),
            RunOutcome::Reverted => "reverted".to_string(),
            RunOutcome::SkippedMissingFile => "skipped (file missing)".to_string(),
            RunOutcome::Failed(e) => format!("FAILED: {e}"),
        };
        println!(
            "  {} (ID {}): {}",
            timestamp::to_sql_text(entry.timestamp),
            entry.id,
            label
        );
    }
}

/// Print a left-aligned table with a dashed separator under the header.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let render = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!(
        "{}",
        render(headers.iter().map(|h| h.to_string()).collect())
    );
    println!(
        "{}",
        render(widths.iter().map(|&w| "-".repeat(w)).collect())
    );
    for row in rows {
        println!("{}", render(row.clone()));
    }
}
