//! Tests for Connection
//!
//! These tests verify:
//! - Open in create and read-write modes
//! - Command execution and persist-after-mutation
//! - The `run` bracket used by the CLI
//! - Teardown on error paths

use std::fs;
use std::path::PathBuf;

use slotdb::command::{Command, Outcome};
use slotdb::config::Config;
use slotdb::connection::{run, Connection};
use slotdb::{OpenMode, Record, SlotError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_path() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("people.db");
    (temp_dir, path)
}

fn small_config() -> Config {
    Config::builder()
        .max_field_bytes(16)
        .capacity(4)
        .sync_on_write(false)
        .build()
}

fn create_file(path: &PathBuf) {
    run(
        path,
        Command::Create {
            max_field_bytes: 16,
            capacity: 4,
        },
        &small_config(),
    )
    .unwrap();
}

fn set(path: &PathBuf, id: usize, name: &str, email: &str) -> slotdb::Result<Outcome> {
    run(
        path,
        Command::Set {
            id,
            name: name.to_string(),
            email: email.to_string(),
        },
        &small_config(),
    )
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_create_does_not_persist_until_asked() {
    let (_temp, path) = setup_temp_path();

    let mut conn = Connection::create(&path, &small_config()).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);

    conn.persist().unwrap();
    conn.close().unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 8 + 4 * 8);
}

#[test]
fn test_create_rejects_zero_shape_before_truncating() {
    let (_temp, path) = setup_temp_path();
    fs::write(&path, b"keep me").unwrap();
    let config = Config::builder().capacity(0).build();

    let result = Connection::create(&path, &config);

    assert!(matches!(result, Err(SlotError::Usage(_))));
    assert_eq!(fs::read(&path).unwrap(), b"keep me");
}

#[test]
fn test_open_existing_missing_file_fails() {
    let (_temp, path) = setup_temp_path();

    let result = Connection::open_existing(&path, &small_config());

    assert!(matches!(result, Err(SlotError::Io(_))));
}

#[test]
fn test_open_existing_uses_file_shape() {
    let (_temp, path) = setup_temp_path();
    create_file(&path);

    // Config shape is ignored when the file already has a header
    let config = Config::builder().max_field_bytes(512).capacity(100).build();
    let conn = Connection::open(&path, OpenMode::ReadWrite, &config).unwrap();

    assert_eq!(conn.table().capacity(), 4);
    assert_eq!(conn.table().max_field_bytes(), 16);
    assert_eq!(conn.path(), path.as_path());
}

#[test]
fn test_open_applies_match_chars() {
    let (_temp, path) = setup_temp_path();
    create_file(&path);

    let config = Config::builder().match_chars(1).build();
    let conn = Connection::open_existing(&path, &config).unwrap();

    assert_eq!(conn.table().match_chars(), 1);
}

// =============================================================================
// Execute Tests
// =============================================================================

#[test]
fn test_execute_persists_mutations() {
    let (_temp, path) = setup_temp_path();
    create_file(&path);

    let mut conn = Connection::open_existing(&path, &small_config()).unwrap();
    conn.execute(Command::Set {
        id: 1,
        name: "Bob".into(),
        email: "b@x".into(),
    })
    .unwrap();
    // Dropped without close: the write already reached the file
    drop(conn);

    let conn = Connection::open_existing(&path, &small_config()).unwrap();
    assert_eq!(conn.table().get(1).unwrap().name, "Bob");
}

#[test]
fn test_execute_reads_do_not_write() {
    let (_temp, path) = setup_temp_path();
    create_file(&path);
    let bytes = fs::read(&path).unwrap();

    let mut conn = Connection::open_existing(&path, &small_config()).unwrap();
    conn.execute(Command::List).unwrap();
    conn.execute(Command::Find { term: "A".into() }).unwrap();
    conn.close().unwrap();

    assert_eq!(fs::read(&path).unwrap(), bytes);
}

#[test]
fn test_execute_set_returns_stored_record() {
    let (_temp, path) = setup_temp_path();
    create_file(&path);

    let outcome = set(&path, 0, "A very long name indeed", "a@x").unwrap();

    assert_eq!(
        outcome,
        Outcome::Stored(Record {
            id: 0,
            present: true,
            name: "A very long nam".into(),
            email: "a@x".into(),
        })
    );
    assert!(outcome.records().is_empty());
}

#[test]
fn test_failed_set_leaves_file_unchanged() {
    let (_temp, path) = setup_temp_path();
    create_file(&path);
    set(&path, 0, "Ann", "a@x").unwrap();
    let bytes = fs::read(&path).unwrap();

    let result = set(&path, 0, "Eve", "e@x");

    assert!(matches!(result, Err(SlotError::AlreadySet(0))));
    assert_eq!(fs::read(&path).unwrap(), bytes);
}

#[test]
fn test_execute_create_replaces_table() {
    let (_temp, path) = setup_temp_path();
    create_file(&path);
    set(&path, 0, "Ann", "a@x").unwrap();

    let outcome = run(
        &path,
        Command::Create {
            max_field_bytes: 8,
            capacity: 2,
        },
        &small_config(),
    )
    .unwrap();

    assert_eq!(
        outcome,
        Outcome::Created {
            max_field_bytes: 8,
            capacity: 2
        }
    );
    let conn = Connection::open_existing(&path, &small_config()).unwrap();
    assert_eq!(conn.table().capacity(), 2);
    assert!(conn.table().is_empty());
}

#[test]
fn test_table_mut_then_persist() {
    let (_temp, path) = setup_temp_path();
    create_file(&path);

    let mut conn = Connection::open_existing(&path, &small_config()).unwrap();
    conn.table_mut().set(3, "Dan", "d@x").unwrap();
    conn.persist().unwrap();
    conn.close().unwrap();

    let outcome = run(&path, Command::Get { id: 3 }, &small_config()).unwrap();
    assert_eq!(outcome.records()[0].name, "Dan");
}

#[test]
fn test_resize_persists_new_shape() {
    let (_temp, path) = setup_temp_path();
    create_file(&path);
    set(&path, 1, "Bob", "bob@example.com").unwrap();

    run(
        &path,
        Command::Resize {
            max_field_bytes: 4,
            capacity: 6,
        },
        &small_config(),
    )
    .unwrap();

    let conn = Connection::open_existing(&path, &small_config()).unwrap();
    let table = conn.table();
    assert_eq!(table.capacity(), 6);
    assert_eq!(table.max_field_bytes(), 4);
    assert_eq!(table.get(1).unwrap().email, "bob");
    assert_eq!(table.slots()[5], Record::empty(5));
}

#[test]
fn test_create_same_shape_resets_populated_file() {
    let (_temp, path) = setup_temp_path();
    create_file(&path);
    set(&path, 2, "Cat", "c@x").unwrap();

    let mut conn = Connection::open_existing(&path, &small_config()).unwrap();
    conn.execute(Command::Create {
        max_field_bytes: 16,
        capacity: 4,
    })
    .unwrap();
    conn.close().unwrap();

    let conn = Connection::open_existing(&path, &small_config()).unwrap();
    assert!(conn.table().is_empty());
    assert_eq!(conn.table().capacity(), 4);
}

#[test]
fn test_create_on_fresh_connection_keeps_table() {
    let (_temp, path) = setup_temp_path();
    let config = Config::builder()
        .max_field_bytes(16)
        .capacity(4)
        .match_chars(2)
        .sync_on_write(false)
        .build();

    let mut conn = Connection::create(&path, &config).unwrap();
    let before = conn.table().clone();
    conn.execute(Command::Create {
        max_field_bytes: 16,
        capacity: 4,
    })
    .unwrap();

    assert_eq!(conn.table(), &before);
    assert_eq!(conn.table().match_chars(), 2);
    assert_eq!(fs::metadata(&path).unwrap().len(), 8 + 4 * 8);
}

#[test]
fn test_open_existing_with_huge_field_cap() {
    let (_temp, path) = setup_temp_path();
    let mut bytes = u32::MAX.to_le_bytes().to_vec();
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0]);
    fs::write(&path, &bytes).unwrap();

    let conn = Connection::open_existing(&path, &small_config()).unwrap();

    assert_eq!(conn.table().capacity(), 1);
    conn.close().unwrap();
}
