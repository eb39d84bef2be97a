//! Run command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, RunArgs, RunDirection};
use crate::commands::common::{reconcile_ledger, CommandContext, ExitCode};
use mig_core::timestamp;
use mig_ledger::{entry, runner, Direction, LedgerError, RunOutcome};

/// Execute the run command: a single migration, strict, no pointer movement.
pub fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    reconcile_ledger(&ctx, global.verbose)?;

    let entry = entry::get_entry(&ctx.db, args.id)?.ok_or(LedgerError::NotFound(args.id))?;
    let direction = match args.direction {
        RunDirection::Up => Direction::Up,
        RunDirection::Down => Direction::Down,
    };

    let ts = timestamp::to_sql_text(entry.timestamp);
    match runner::run_one(&ctx.db, &ctx.migrations_dir(), &entry, direction)? {
        RunOutcome::Applied => println!("Applied migration {ts} (ID {})", entry.id),
        RunOutcome::Reverted => println!("Reverted migration {ts} (ID {})", entry.id),
        RunOutcome::SkippedMissingFile => {
            println!("Skipped migration {ts} (ID {}): file missing", entry.id)
        }
        RunOutcome::Failed(e) => {
            eprintln!("Migration {ts} (ID {}) failed: {e}", entry.id);
            return Err(ExitCode(1).into());
        }
    }
    Ok(())
}
