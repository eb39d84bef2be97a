//! Recreate command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::commands::common::CommandContext;

/// Execute the recreate command
pub fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = CommandContext::load(global)?;

    if ctx.db.ledger_exists()? {
        println!(
            "Ledger table '{}' already exists; nothing to do.",
            ctx.config.ledger_table
        );
        return Ok(());
    }

    ctx.db.ensure_ledger()?;
    println!("Created ledger table '{}'.", ctx.config.ledger_table);
    Ok(())
}
