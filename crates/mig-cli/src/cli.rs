//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// mig - ledger-driven schema migrations for DuckDB
#[derive(Parser, Debug)]
#[command(name = "mig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new timestamped migration file
    Add,

    /// List ledger entries
    List(ListArgs),

    /// Run a single migration by ledger id, without moving the pointer
    Run(RunArgs),

    /// Apply every pending migration up to and including a target id
    Up(UpArgs),

    /// Revert every applied migration newer than a target id
    Down(DownArgs),

    /// Show the current migration pointer
    Status,

    /// Create the ledger table if it does not exist
    Recreate,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(default_value_t = 1)]
    pub page: i64,

    /// Entries per page
    #[arg(default_value_t = 30)]
    pub per_page: i64,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Direction to run the migration in
    #[arg(value_enum)]
    pub direction: RunDirection,

    /// Ledger id of the migration
    pub id: i64,
}

/// Direction argument for the run command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunDirection {
    /// Forward procedure
    Up,
    /// Reverse procedure
    Down,
}

/// Arguments for the up command
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Target ledger id (inclusive)
    pub id: i64,

    /// Record failures and keep going instead of halting
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the down command
#[derive(Args, Debug)]
pub struct DownArgs {
    /// Target ledger id (exclusive; this entry stays applied)
    pub id: i64,

    /// Record failures and keep going instead of halting
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
