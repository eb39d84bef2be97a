//! Down command implementation

use anyhow::Result;

use crate::cli::{DownArgs, GlobalArgs};
use crate::commands::common::{print_report, reconcile_ledger, CommandContext, ExitCode};
use mig_ledger::{plan, runner, Direction};

/// Execute the down command
pub fn execute(args: &DownArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    reconcile_ledger(&ctx, global.verbose)?;

    let plan = plan::plan(&ctx.db, args.id, Direction::Down)?;
    if plan.is_empty() {
        println!("Nothing to revert; no active migrations newer than ID {}.", args.id);
        return Ok(());
    }

    println!(
        "Reverting {} migration{} down to ID {}:",
        plan.len(),
        if plan.len() == 1 { "" } else { "s" },
        args.id
    );
    let report =
        runner::run_batch(&ctx.db, &ctx.migrations_dir(), &plan, Direction::Down, args.force)?;
    print_report(&report);

    if report.halted {
        eprintln!("Halted at first failure; remaining migrations were not attempted.");
        return Err(ExitCode(1).into());
    }

    let failures = report.failure_count();
    if failures > 0 {
        log::warn!("forced batch finished with {failures} failed migration(s)");
        println!(
            "Completed with {failures} failure{} (forced).",
            if failures == 1 { "" } else { "s" }
        );
    } else {
        println!("Done.");
    }
    Ok(())
}
