//! Up command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, UpArgs};
use crate::commands::common::{print_report, reconcile_ledger, CommandContext, ExitCode};
use mig_ledger::{current, plan, runner, Direction};

/// Execute the up command
pub fn execute(args: &UpArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    reconcile_ledger(&ctx, global.verbose)?;

    let plan = plan::plan(&ctx.db, args.id, Direction::Up)?;
    if plan.is_empty() {
        println!("Nothing to apply; everything up to ID {} is active.", args.id);
        return Ok(());
    }

    println!(
        "Applying {} migration{} up to ID {}:",
        plan.len(),
        if plan.len() == 1 { "" } else { "s" },
        args.id
    );
    let report = runner::run_batch(&ctx.db, &ctx.migrations_dir(), &plan, Direction::Up, args.force)?;
    print_report(&report);

    if report.halted {
        eprintln!("Halted at first failure; remaining migrations were not attempted.");
        return Err(ExitCode(1).into());
    }

    // The pointer follows the last committed entry, which under --force can
    // fall short of the requested target.
    if let Some(last) = report.last_succeeded() {
        current::set_current(&ctx.db, last)?;
        if global.verbose {
            eprintln!("[verbose] Current pointer moved to ID {last}");
        }
    }

    let failures = report.failure_count();
    if failures > 0 {
        log::warn!("forced batch finished with {failures} failed migration(s); pointer stops at the last applied entry");
        println!(
            "Completed with {failures} failure{} (forced).",
            if failures == 1 { "" } else { "s" }
        );
    } else {
        println!("Done.");
    }
    Ok(())
}
