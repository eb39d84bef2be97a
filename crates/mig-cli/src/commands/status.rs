//! Status command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::commands::common::CommandContext;
use mig_core::timestamp;
use mig_ledger::{current, entry};

/// Execute the status command
pub fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    ctx.db.require_ledger()?;

    match current::current_entry(&ctx.db)? {
        Some(c) => println!(
            "Current migration: ID {} ({})",
            c.id,
            timestamp::to_sql_text(c.timestamp)
        ),
        None => println!("No current migration yet."),
    }

    let entries = entry::full_list(&ctx.db, 0, 0)?;
    let applied = entries.iter().filter(|e| e.active).count();
    println!(
        "{applied} of {} migration{} applied",
        entries.len(),
        if entries.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
