//! Add command implementation

use anyhow::{Context, Result};
use std::fs;

use crate::cli::GlobalArgs;
use crate::commands::common::{load_config, ExitCode};
use mig_core::timestamp;

/// Execute the add command
pub fn execute(global: &GlobalArgs) -> Result<()> {
    let (config, root) = load_config(global)?;
    let dir = config.migrations_dir(&root);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let now = chrono::Local::now().naive_local();
    let filename = timestamp::filename_from_timestamp(now);
    let path = dir.join(&filename);

    // Two adds within the same second would collide.
    if path.exists() {
        eprintln!("{} already exists; try again", path.display());
        return Err(ExitCode(1).into());
    }

    fs::write(&path, migration_template())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

/// Skeleton content for a new migration file.
pub(crate) fn migration_template() -> &'static str {
    "-- migrate:up\n\
     -- Forward statements go here.\n\
     \n\
     -- migrate:down\n\
     -- Reverse statements go here; leave empty if this migration cannot be undone.\n"
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
