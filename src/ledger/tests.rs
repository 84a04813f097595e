use std::fs;
use chrono::NaiveDate;
use tempfile::TempDir;
use crate::ledger::{file_name_for, latest_file, load_dir, load_file, parse_file_name, Assignment, LedgerEntry, LedgerError, LedgerFile};
use crate::transaction::tests::transaction;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
}

fn divvies() -> Vec<LedgerEntry> {
    let mut first = transaction("2023-01-01", -42.1, "desc 0");
    first.category = "cat 0".to_string();
    first.account_name = "acct 0".to_string();
    first.labels = "label 0".to_string();
    first.notes = "note 0".to_string();

    let mut split = Assignment::new();
    split.insert("Mark", 12.1);
    split.insert("Anne", 30.0);

    let mut second = transaction("2022-12-31", 0.1 + 0.2, "desc \"1\"\nwith newline");
    second.notes = "ünïcödé".to_string();

    vec![
        LedgerEntry { transaction: first, assignment: split },
        LedgerEntry { transaction: second, assignment: Assignment::single("Anne", 0.1 + 0.2) },
        LedgerEntry { transaction: transaction("2023-01-02", 20.0, "Rent"), assignment: Assignment::new() },
    ]
}

#[test]
fn test_write_then_read() {
    let dir = TempDir::new().unwrap();
    let mut ledger_file = LedgerFile::create(dir.path(), at(2023, 1, 31, 18, 4, 59)).unwrap();
    let path = ledger_file.path().to_path_buf();
    assert_eq!(path.file_name().unwrap(), "2023-01-31-18-04-59");

    let written = divvies();
    for d in &written {
        ledger_file.write(d).unwrap();
    }
    drop(ledger_file);

    let reloaded = load_file(&path).unwrap();
    assert_eq!(reloaded, written);
    assert_eq!(reloaded[1].transaction.amount, 0.1 + 0.2);
    assert_eq!(reloaded[0].assignment.get("Anne"), Some(30.0));
}

#[test]
fn test_records_are_readable_json() {
    let dir = TempDir::new().unwrap();
    let mut ledger_file = LedgerFile::create(dir.path(), at(2023, 2, 1, 0, 0, 0)).unwrap();
    ledger_file.write(&LedgerEntry {
        transaction: transaction("2023-01-01", -10.0, "Coffee"),
        assignment: Assignment::single("Mark", -10.0),
    }).unwrap();

    let content = fs::read_to_string(ledger_file.path()).unwrap();
    assert!(content.starts_with("{\n    \"transaction\": {\n        \"date\": \"2023-01-01\",\n"), "{}", content);
    assert!(content.contains("    \"assignment\": {\n        \"Mark\": -10.0\n    }"), "{}", content);
    assert!(content.ends_with("}\n"));
}

#[test]
fn test_create_collision() {
    let dir = TempDir::new().unwrap();
    let now = at(2023, 1, 31, 18, 4, 59);
    let _first = LedgerFile::create(dir.path(), now).unwrap();

    match LedgerFile::create(dir.path(), now) {
        Err(LedgerError::AlreadyExists(path)) => assert_eq!(path, dir.path().join("2023-01-31-18-04-59")),
        Err(e) => panic!("Unexpected error {}", e),
        Ok(_) => panic!("Expected a collision"),
    }
}

#[test]
fn test_continue_latest_appends() {
    let dir = TempDir::new().unwrap();
    let entries = divvies();

    let mut older = LedgerFile::create(dir.path(), at(2023, 1, 1, 9, 0, 0)).unwrap();
    older.write(&entries[0]).unwrap();
    let mut newer = LedgerFile::create(dir.path(), at(2023, 1, 2, 9, 0, 0)).unwrap();
    newer.write(&entries[1]).unwrap();
    let newer_path = newer.path().to_path_buf();
    drop(older);
    drop(newer);

    // Not a ledger file name, must not be picked up as the latest
    fs::write(dir.path().join("notes.txt"), "").unwrap();

    let mut continued = LedgerFile::continue_latest(dir.path()).unwrap();
    assert_eq!(continued.path(), newer_path.as_path());
    continued.write(&entries[2]).unwrap();
    drop(continued);

    assert_eq!(load_file(&newer_path).unwrap(), vec![entries[1].clone(), entries[2].clone()]);
}

#[test]
fn test_continue_without_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".hidden"), "").unwrap();

    assert!(matches!(LedgerFile::continue_latest(dir.path()), Err(LedgerError::NoLedgerFiles(_))));
    assert_eq!(latest_file(dir.path()).unwrap(), None);
}

#[test]
fn test_load_dir_skips_hidden_and_directories() {
    let dir = TempDir::new().unwrap();
    let entries = divvies();

    let mut first = LedgerFile::create(dir.path(), at(2023, 1, 1, 9, 0, 0)).unwrap();
    first.write(&entries[0]).unwrap();
    first.write(&entries[1]).unwrap();
    let mut second = LedgerFile::create(dir.path(), at(2023, 1, 2, 9, 0, 0)).unwrap();
    second.write(&entries[2]).unwrap();
    drop(first);
    drop(second);

    fs::write(dir.path().join(".DS_Store"), "not json").unwrap();
    fs::create_dir(dir.path().join("archive")).unwrap();
    fs::write(dir.path().join("archive").join("2022-01-01-00-00-00"), "not json either").unwrap();

    let ledger = load_dir(dir.path()).unwrap();
    assert_eq!(ledger, entries);
}

#[test]
fn test_load_dir_requires_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");
    assert!(matches!(load_dir(&missing), Err(LedgerError::NotADirectory(_))));
}

#[test]
fn test_decode_error_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut ledger_file = LedgerFile::create(dir.path(), at(2023, 1, 1, 9, 0, 0)).unwrap();
    ledger_file.write(&divvies()[0]).unwrap();
    let path = ledger_file.path().to_path_buf();
    drop(ledger_file);

    // Simulate a record cut off half way
    let mut content = fs::read_to_string(&path).unwrap();
    content.push_str("{\n    \"transaction\": {\n        \"date\": \"2023-");
    fs::write(&path, content).unwrap();

    match load_file(&path) {
        Err(e @ LedgerError::Decode(..)) => {
            assert_eq!(e.to_string(), format!("failed to decode divvy from ledger file '{}'", path.display()));
            // The decoder's message is only reported once, as the cause
            let cause = std::error::Error::source(&e).unwrap().to_string();
            assert!(cause.contains("EOF"), "{}", cause);
        },
        other => panic!("Unexpected results {:?}", other.map(|e| e.len())),
    }
    assert!(load_dir(dir.path()).is_err());
}

#[test]
fn test_remove_if_empty() {
    let dir = TempDir::new().unwrap();
    let empty = LedgerFile::create(dir.path(), at(2023, 1, 1, 9, 0, 0)).unwrap();
    let empty_path = empty.path().to_path_buf();
    assert!(empty.remove_if_empty().unwrap());
    assert!(!empty_path.exists());

    let mut used = LedgerFile::create(dir.path(), at(2023, 1, 1, 9, 0, 1)).unwrap();
    used.write(&divvies()[2]).unwrap();
    let used_path = used.path().to_path_buf();
    assert!(!used.remove_if_empty().unwrap());
    assert!(used_path.exists());
}

#[test]
fn test_file_names() {
    let created = at(2023, 11, 5, 7, 3, 9);
    assert_eq!(file_name_for(created), "2023-11-05-07-03-09");
    assert_eq!(parse_file_name("2023-11-05-07-03-09"), Some(created));
    assert_eq!(parse_file_name("notes.txt"), None);
}
