//! Tests for the two-phase ledger reconciler.

use super::*;
use crate::connection::LedgerDb;
use mig_core::timestamp::timestamp_from_filename;
use std::path::PathBuf;

fn db() -> LedgerDb {
    LedgerDb::open_memory("migration_ledger").unwrap()
}

/// Build an in-memory MigrationFile without touching disk; reconciliation
/// only looks at timestamps.
fn file(name: &str) -> MigrationFile {
    MigrationFile {
        timestamp: timestamp_from_filename(name).unwrap(),
        filename: name.to_string(),
        path: PathBuf::from(name),
    }
}

fn mark_active(db: &LedgerDb, ts: &str) {
    db.conn()
        .execute(
            "UPDATE migration_ledger SET active = true WHERE timestamp = CAST(? AS TIMESTAMP)",
            duckdb::params![ts],
        )
        .unwrap();
}

#[test]
fn inserts_unseen_files() {
    let db = db();
    let files = vec![
        file("2024_01_01_00_00_00.sql"),
        file("2024_01_02_00_00_00.sql"),
    ];
    let stats = reconcile(&db, &files).unwrap();
    assert_eq!(stats, ReconcileStats { inserted: 2, pruned: 0 });

    let list = entry::full_list(&db, 0, 0).unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|e| !e.active && !e.is_current));
}

#[test]
fn second_pass_is_idempotent() {
    let db = db();
    let files = vec![
        file("2024_01_01_00_00_00.sql"),
        file("2024_01_02_00_00_00.sql"),
    ];
    reconcile(&db, &files).unwrap();
    let stats = reconcile(&db, &files).unwrap();
    assert_eq!(
        stats,
        ReconcileStats { inserted: 0, pruned: 0 },
        "No filesystem change should mean zero ledger writes"
    );
    assert_eq!(entry::count(&db).unwrap(), 2);
}

#[test]
fn prunes_orphaned_inactive_rows() {
    let db = db();
    reconcile(
        &db,
        &[
            file("2024_01_01_00_00_00.sql"),
            file("2024_01_02_00_00_00.sql"),
        ],
    )
    .unwrap();

    // The second file disappears from disk; its row was never applied.
    let stats = reconcile(&db, &[file("2024_01_01_00_00_00.sql")]).unwrap();
    assert_eq!(stats, ReconcileStats { inserted: 0, pruned: 1 });
    let list = entry::full_list(&db, 0, 0).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(
        mig_core::timestamp::to_sql_text(list[0].timestamp),
        "2024-01-01 00:00:00"
    );
}

#[test]
fn never_prunes_active_rows() {
    let db = db();
    reconcile(&db, &[file("2024_01_01_00_00_00.sql")]).unwrap();
    mark_active(&db, "2024-01-01 00:00:00");

    // File deleted, but the row's effect is already in the schema.
    let stats = reconcile(&db, &[]).unwrap();
    assert_eq!(stats.pruned, 0);
    assert_eq!(entry::count(&db).unwrap(), 1);
}

#[test]
fn mixed_insert_and_prune() {
    let db = db();
    reconcile(
        &db,
        &[
            file("2024_01_01_00_00_00.sql"),
            file("2024_01_02_00_00_00.sql"),
        ],
    )
    .unwrap();
    mark_active(&db, "2024-01-01 00:00:00");

    // 01 loses its file but stays (active); 02 loses its file and goes;
    // 03 is new.
    let stats = reconcile(&db, &[file("2024_01_03_00_00_00.sql")]).unwrap();
    assert_eq!(stats, ReconcileStats { inserted: 1, pruned: 1 });

    let list = entry::full_list(&db, 0, 0).unwrap();
    let stamps: Vec<String> = list
        .iter()
        .map(|e| mig_core::timestamp::to_sql_text(e.timestamp))
        .collect();
    assert_eq!(stamps, vec!["2024-01-01 00:00:00", "2024-01-03 00:00:00"]);
}

#[test]
fn empty_directory_and_empty_ledger_is_a_noop() {
    let db = db();
    let stats = reconcile(&db, &[]).unwrap();
    assert_eq!(stats, ReconcileStats::default());
}
