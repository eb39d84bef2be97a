//! List command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, ListArgs};
use crate::commands::common::{print_table, CommandContext, ExitCode};
use mig_core::timestamp;
use mig_ledger::{current, entry, LedgerEntry};

/// Execute the list command
pub fn execute(args: &ListArgs, global: &GlobalArgs) -> Result<()> {
    if args.page < 1 || args.per_page < 1 {
        eprintln!("page and per_page must be at least 1");
        return Err(ExitCode(2).into());
    }
    let Some(offset) = page_offset(args.page, args.per_page) else {
        eprintln!("page and per_page are out of range");
        return Err(ExitCode(2).into());
    };

    let ctx = CommandContext::load(global)?;
    ctx.db.require_ledger()?;

    let total = entry::count(&ctx.db)?;
    let entries = entry::full_list(&ctx.db, offset, args.per_page)?;

    if entries.is_empty() {
        println!("No migrations on page {} ({} total).", args.page, total);
        return Ok(());
    }

    let current = current::current_entry(&ctx.db)?;
    let rows = format_rows(&entries, current.as_ref());
    print_table(&["", "ID", "TIMESTAMP", "STATE"], &rows);

    let pages = (total as u64).div_ceil(args.per_page as u64) as i64;
    println!();
    println!(
        "Page {} of {} ({} migration{})",
        args.page,
        pages.max(1),
        total,
        if total == 1 { "" } else { "s" }
    );
    Ok(())
}

/// Row offset for a 1-based page, or `None` when the pair overflows.
fn page_offset(page: i64, per_page: i64) -> Option<i64> {
    (page - 1).checked_mul(per_page)
}

/// One table row per entry.
///
/// `*` marks the current pointer; `-` marks an inactive entry older than
/// the pointer (applied history has a hole there).
fn format_rows(entries: &[LedgerEntry], current: Option<&LedgerEntry>) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|e| {
            let marker = if e.is_current {
                "*"
            } else if !e.active && current.is_some_and(|c| e.timestamp < c.timestamp) {
                "-"
            } else {
                ""
            };
            vec![
                marker.to_string(),
                e.id.to_string(),
                timestamp::to_sql_text(e.timestamp),
                if e.active { "applied" } else { "pending" }.to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
