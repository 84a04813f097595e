use std::path::PathBuf;
use chrono::NaiveDate;
use crate::csv_reader::{parse_transactions, read_transactions, CsvError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_read_transactions() {
    let transactions = read_transactions(&fixture_filename("transactions.csv")).unwrap();
    assert_eq!(transactions.len(), 4);

    let coffee = &transactions[0];
    assert_eq!(coffee.date, date(2023, 1, 1));
    assert_eq!(coffee.description, "Coffee");
    assert_eq!(coffee.original_description, "SQ *BLUE BOTTLE COFFEE");
    assert_eq!(coffee.amount, -10.0);
    assert_eq!(coffee.category, "Coffee Shops");
    assert_eq!(coffee.account_name, "Visa");

    let rent = &transactions[1];
    assert_eq!(rent.date, date(2023, 1, 2));
    assert_eq!(rent.amount, -2000.0);
    assert_eq!(rent.labels, "shared");
    assert_eq!(rent.notes, "January");

    assert_eq!(transactions[2].amount, 24.99);
    // Already negative and typed as debit: stays a debit
    assert_eq!(transactions[3].amount, -54.1);
    assert_eq!(transactions[3].date, date(2022, 12, 31));
}

#[test]
fn test_header_row_is_optional() {
    let transactions = read_transactions(&fixture_filename("no_header.csv")).unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].description, "Coffee");
}

#[test]
fn test_header_must_match_exactly() {
    let csv = "date,description,original description,amount,transaction type,category,account name,labels,notes\n";
    let transactions = parse_transactions(csv.as_bytes()).unwrap();
    // Not recognised as a header, so it is parsed as a (broken) row
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].description, "description");
    assert_eq!(transactions[0].amount, 0.0);
}

#[test]
fn test_bad_rows_are_kept() {
    let transactions = read_transactions(&fixture_filename("bad_rows.csv")).unwrap();
    assert_eq!(transactions.len(), 6);

    assert_eq!(transactions[0].date, date(1970, 1, 1));
    assert_eq!(transactions[0].amount, -5.0);

    assert_eq!(transactions[1].date, date(2023, 1, 3));
    assert_eq!(transactions[1].amount, 0.0);

    // Unknown type keeps the amount as written
    assert_eq!(transactions[2].amount, 7.5);

    assert_eq!(transactions[3].amount, 1.25);
    assert_eq!(transactions[3].description, "Good");

    // Amounts that are not finite would not survive in the ledger
    assert_eq!(transactions[4].description, "Not a number");
    assert_eq!(transactions[4].amount, 0.0);
    assert_eq!(transactions[5].description, "Infinite");
    assert_eq!(transactions[5].amount, 0.0);
}

#[test]
fn test_non_finite_amounts() {
    let csv = "1/1/2023,A,A,NaN,debit,,,,\n1/2/2023,B,B,-inf,debit,,,,\n1/3/2023,C,C,infinity,credit,,,,\n";
    let transactions = parse_transactions(csv.as_bytes()).unwrap();
    assert_eq!(transactions.len(), 3);
    assert!(transactions.iter().all(|t| t.amount == 0.0));
}

#[test]
fn test_wrong_column_count_is_fatal() {
    let result = read_transactions(&fixture_filename("wrong_columns.csv"));
    match result {
        Err(CsvError::InvalidFileError(msg)) => assert!(msg.contains("row 2"), "{}", msg),
        other => panic!("Unexpected results {:?}", other),
    }
}

#[test]
fn test_missing_file() {
    let result = read_transactions(&fixture_filename("does_not_exist.csv"));
    assert!(matches!(result, Err(CsvError::FileNotFoundError(_))));
}

#[test]
fn test_source_order_is_preserved() {
    let csv = "3/1/2023,C,C,1,debit,,,,\n1/1/2023,A,A,1,debit,,,,\n2/1/2023,B,B,1,debit,,,,\n";
    let transactions = parse_transactions(csv.as_bytes()).unwrap();
    let descriptions: Vec<&str> = transactions.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, vec!["C", "A", "B"]);
}

/// Return the path to a file within the test data directory
pub(crate) fn fixture_filename(filename: &str) -> PathBuf {
    let mut dir = fixture_dir();
    dir.push(filename);
    dir
}

pub(crate) fn fixture_dir() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("fixture");
    dir
}
