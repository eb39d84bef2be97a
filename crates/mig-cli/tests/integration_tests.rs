//! Integration tests for mig
//!
//! Drives the full scan / reconcile / plan / run / pointer pipeline the way
//! the CLI commands do, against scratch projects on disk.

use mig_core::{Config, Scanner, SortOrder};
use mig_ledger::{current, entry, plan, reconcile, runner, Direction, LedgerDb, LedgerEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const T1: &str = "2024_01_01_00_00_00.sql";
const T2: &str = "2024_01_02_00_00_00.sql";
const T3: &str = "2024_01_03_00_00_00.sql";

const CREATE_A: &str = "-- migrate:up\nCREATE TABLE a (id INTEGER);\n-- migrate:down\nDROP TABLE a;\n";
const CREATE_B: &str = "-- migrate:up\nCREATE TABLE b (id INTEGER);\n-- migrate:down\nDROP TABLE b;\n";
const CREATE_C: &str = "-- migrate:up\nCREATE TABLE c (id INTEGER);\n-- migrate:down\nDROP TABLE c;\n";
const BROKEN: &str = "-- migrate:up\nSELECT * FROM no_such_table;\n";

fn project(files: &[(&str, &str)]) -> (TempDir, LedgerDb) {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("migrations")).unwrap();
    for (name, body) in files {
        fs::write(dir.path().join("migrations").join(name), body).unwrap();
    }
    let db = LedgerDb::open_memory("migration_ledger").unwrap();
    (dir, db)
}

fn migrations_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("migrations")
}

/// Scan and reconcile, as every action command does before planning.
fn sync(db: &LedgerDb, dir: &Path) -> Vec<LedgerEntry> {
    let files = Scanner::new(dir).files(SortOrder::Ascending).unwrap();
    reconcile::reconcile(db, &files).unwrap();
    entry::full_list(db, 0, 0).unwrap()
}

fn table_exists(db: &LedgerDb, name: &str) -> bool {
    db.conn()
        .query_row(
            &format!("SELECT COUNT(*) FROM {name}"),
            [],
            |row| row.get::<_, i64>(0),
        )
        .is_ok()
}

fn active_ids(db: &LedgerDb) -> Vec<i64> {
    entry::full_list(db, 0, 0)
        .unwrap()
        .iter()
        .filter(|e| e.active)
        .map(|e| e.id)
        .collect()
}

#[test]
fn full_forward_pass_applies_in_order_and_points_at_target() {
    let (dir, db) = project(&[(T1, CREATE_A), (T2, CREATE_B), (T3, CREATE_C)]);
    let entries = sync(&db, &migrations_dir(&dir));
    assert_eq!(entries.len(), 3);
    let target = entries[2].id;

    let batch = plan::plan(&db, target, Direction::Up).unwrap();
    let report = runner::run_batch(&db, &migrations_dir(&dir), &batch, Direction::Up, false).unwrap();
    assert!(!report.halted);
    assert_eq!(report.failure_count(), 0);
    current::set_current(&db, report.last_succeeded().unwrap()).unwrap();

    assert!(table_exists(&db, "a"));
    assert!(table_exists(&db, "b"));
    assert!(table_exists(&db, "c"));
    assert_eq!(active_ids(&db).len(), 3);
    assert_eq!(current::current_entry(&db).unwrap().unwrap().id, target);
}

#[test]
fn down_reverts_newer_entries_and_leaves_the_pointer() {
    let (dir, db) = project(&[(T1, CREATE_A), (T2, CREATE_B), (T3, CREATE_C)]);
    let entries = sync(&db, &migrations_dir(&dir));
    let (first, last) = (entries[0].id, entries[2].id);

    let up = plan::plan(&db, last, Direction::Up).unwrap();
    runner::run_batch(&db, &migrations_dir(&dir), &up, Direction::Up, false).unwrap();
    current::set_current(&db, last).unwrap();

    let down = plan::plan(&db, first, Direction::Down).unwrap();
    assert_eq!(
        down.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![entries[2].id, entries[1].id],
        "reverse chronological order"
    );
    let report =
        runner::run_batch(&db, &migrations_dir(&dir), &down, Direction::Down, false).unwrap();
    assert!(!report.halted);

    assert!(table_exists(&db, "a"));
    assert!(!table_exists(&db, "b"));
    assert!(!table_exists(&db, "c"));
    assert_eq!(active_ids(&db), vec![first]);
    // Reverse batches never move the pointer.
    assert_eq!(current::current_entry(&db).unwrap().unwrap().id, last);
}

#[test]
fn up_down_up_round_trip_restores_the_applied_set() {
    let (dir, db) = project(&[(T1, CREATE_A), (T2, CREATE_B), (T3, CREATE_C)]);
    let entries = sync(&db, &migrations_dir(&dir));
    let (first, last) = (entries[0].id, entries[2].id);

    let up = plan::plan(&db, last, Direction::Up).unwrap();
    runner::run_batch(&db, &migrations_dir(&dir), &up, Direction::Up, false).unwrap();
    let applied_before = active_ids(&db);

    let down = plan::plan(&db, first, Direction::Down).unwrap();
    runner::run_batch(&db, &migrations_dir(&dir), &down, Direction::Down, false).unwrap();
    assert_eq!(active_ids(&db), vec![first]);

    let up_again = plan::plan(&db, last, Direction::Up).unwrap();
    runner::run_batch(&db, &migrations_dir(&dir), &up_again, Direction::Up, false).unwrap();

    assert_eq!(active_ids(&db), applied_before);
    assert!(table_exists(&db, "b"));
    assert!(table_exists(&db, "c"));
}

#[test]
fn strict_failure_keeps_the_applied_prefix_only() {
    let (dir, db) = project(&[(T1, CREATE_A), (T2, BROKEN), (T3, CREATE_C)]);
    let entries = sync(&db, &migrations_dir(&dir));
    let target = entries[2].id;

    let batch = plan::plan(&db, target, Direction::Up).unwrap();
    let report = runner::run_batch(&db, &migrations_dir(&dir), &batch, Direction::Up, false).unwrap();

    assert!(report.halted);
    assert_eq!(report.last_succeeded(), Some(entries[0].id));
    assert!(table_exists(&db, "a"));
    assert!(!table_exists(&db, "c"), "entries after the failure must not run");
    assert_eq!(active_ids(&db), vec![entries[0].id]);
    // The pointer is never set after a halted batch.
    assert!(current::current_entry(&db).unwrap().is_none());
}

#[test]
fn forced_run_lands_the_pointer_on_the_last_applied_entry() {
    let (dir, db) = project(&[(T1, CREATE_A), (T2, BROKEN), (T3, CREATE_C)]);
    let entries = sync(&db, &migrations_dir(&dir));
    let target = entries[2].id;

    let batch = plan::plan(&db, target, Direction::Up).unwrap();
    let report = runner::run_batch(&db, &migrations_dir(&dir), &batch, Direction::Up, true).unwrap();

    assert!(!report.halted);
    assert_eq!(report.failure_count(), 1);
    let last = report.last_succeeded().unwrap();
    current::set_current(&db, last).unwrap();

    assert!(table_exists(&db, "a"));
    assert!(table_exists(&db, "c"), "forced mode continues past failures");
    assert_eq!(current::current_entry(&db).unwrap().unwrap().id, entries[2].id);
    assert!(!entry::get_entry(&db, entries[1].id).unwrap().unwrap().active);
}

#[test]
fn reconcile_tracks_disk_changes_between_invocations() {
    let (dir, db) = project(&[(T1, CREATE_A)]);
    assert_eq!(sync(&db, &migrations_dir(&dir)).len(), 1);

    fs::write(migrations_dir(&dir).join(T2), CREATE_B).unwrap();
    assert_eq!(sync(&db, &migrations_dir(&dir)).len(), 2);

    // A never-applied file disappears; its row goes with it.
    fs::remove_file(migrations_dir(&dir).join(T2)).unwrap();
    assert_eq!(sync(&db, &migrations_dir(&dir)).len(), 1);
}

#[test]
fn applied_entry_survives_file_deletion() {
    let (dir, db) = project(&[(T1, CREATE_A), (T2, CREATE_B)]);
    let entries = sync(&db, &migrations_dir(&dir));
    let up = plan::plan(&db, entries[1].id, Direction::Up).unwrap();
    runner::run_batch(&db, &migrations_dir(&dir), &up, Direction::Up, false).unwrap();

    fs::remove_file(migrations_dir(&dir).join(T2)).unwrap();
    let remaining = sync(&db, &migrations_dir(&dir));
    assert_eq!(remaining.len(), 2, "active rows are never pruned");

    // Reverting it now skips the missing file and leaves the row active.
    let down = plan::plan(&db, entries[0].id, Direction::Down).unwrap();
    let report =
        runner::run_batch(&db, &migrations_dir(&dir), &down, Direction::Down, false).unwrap();
    assert!(!report.halted);
    assert!(entry::get_entry(&db, entries[1].id).unwrap().unwrap().active);
    assert!(table_exists(&db, "b"));
}

#[test]
fn config_wires_paths_and_ledger_table() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("db_changes")).unwrap();
    fs::write(
        dir.path().join("db_changes").join(T1),
        CREATE_A,
    )
    .unwrap();
    fs::write(
        dir.path().join("mig.yml"),
        "migrations_path: db_changes\nledger_table: schema_history\ndatabase:\n  path: \":memory:\"\n",
    )
    .unwrap();

    let config = Config::load(&dir.path().join("mig.yml")).unwrap();
    let db = LedgerDb::open_memory(&config.ledger_table).unwrap();
    let files = Scanner::new(&config.migrations_dir(dir.path()))
        .files(SortOrder::Ascending)
        .unwrap();
    let stats = reconcile::reconcile(&db, &files).unwrap();

    assert_eq!(stats.inserted, 1);
    assert_eq!(entry::count(&db).unwrap(), 1);
    assert!(table_exists(&db, "schema_history"));
}

#[test]
fn missing_migrations_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Scanner::new(&dir.path().join("migrations")).files(SortOrder::Ascending);
    assert!(result.is_err());
}
