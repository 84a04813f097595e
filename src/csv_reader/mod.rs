use std::{fmt, io};
use std::fs::File;
use std::path::Path;
use chrono::NaiveDate;
use csv::StringRecord;
use log::{error, info};
use crate::transaction::{Transaction, TransactionType};

#[cfg(test)]
pub(crate) mod tests;

/// Number of columns in a transaction export
pub(crate) const COLUMN_COUNT: usize = 9;

/// Header row of the export. Only an exact match is treated as a header.
const HEADER: [&str; COLUMN_COUNT] = [
    "Date",
    "Description",
    "Original Description",
    "Amount",
    "Transaction Type",
    "Category",
    "Account Name",
    "Labels",
    "Notes",
];

const DATE_FORMAT: &str = "%m/%d/%Y";

// Column positions, 0-based
const DATE: usize = 0;
const DESCRIPTION: usize = 1;
const ORIGINAL_DESCRIPTION: usize = 2;
const AMOUNT: usize = 3;
const TYPE: usize = 4;
const CATEGORY: usize = 5;
const ACCOUNT_NAME: usize = 6;
const LABELS: usize = 7;
const NOTES: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    FileNotFoundError(String),
    InvalidFileError(String),
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "csv reading error: {}",
            match self {
                CsvError::FileNotFoundError(s) => s,
                CsvError::InvalidFileError(s) => s,
            }
        )
    }
}

impl std::error::Error for CsvError {}

/// Read all transactions from a transaction export file
pub(crate) fn read_transactions(file_path: &Path) -> Result<Vec<Transaction>, CsvError> {
    if !file_path.is_file() {
        return Err(CsvError::FileNotFoundError(format!("{} not found", file_path.display())));
    }

    info!("Reading transactions from {}", file_path.display());
    let file = File::open(file_path)
        .map_err(|e| CsvError::InvalidFileError(format!("unable to open {}: {}", file_path.display(), e)))?;
    parse_transactions(file)
}

/// Parse transaction rows in source order.
///
/// A bad date, amount or transaction type only affects its own row: the problem is logged, the field
/// falls back to a default and the row is still returned. A row with the wrong number of columns
/// fails the whole parse.
pub(crate) fn parse_transactions<R: io::Read>(reader: R) -> Result<Vec<Transaction>, CsvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut transactions :Vec<Transaction> = vec![];
    for (i, record) in rdr.records().enumerate() {
        let row_number = i + 1;
        let row = record.map_err(|e| CsvError::InvalidFileError(format!("row {}: {}", row_number, e)))?;
        if row.len() != COLUMN_COUNT {
            return Err(CsvError::InvalidFileError(
                format!("row {} has {} columns, expected {}", row_number, row.len(), COLUMN_COUNT)));
        }

        if i == 0 && is_header(&row) {
            info!("Header row detected");
            continue;
        }

        transactions.push(parse_row(row_number, &row));
    }

    Ok(transactions)
}

fn is_header(row: &StringRecord) -> bool {
    row.iter().eq(HEADER.iter().copied())
}

fn parse_row(row_number: usize, row: &StringRecord) -> Transaction {
    let date = match parse_date(&row[DATE]) {
        Some(date) => date,
        None => {
            error!("Row {}: unable to parse transaction date '{}'", row_number, &row[DATE]);
            default_date()
        }
    };

    let amount = match parse_amount(&row[AMOUNT]) {
        Some(amount) => amount,
        None => {
            error!("Row {}: unable to parse transaction amount '{}'", row_number, &row[AMOUNT]);
            0.0
        }
    };

    let amount = match TransactionType::parse(&row[TYPE]) {
        Some(transaction_type) => transaction_type.signed(amount),
        None => {
            error!("Row {}: unable to parse transaction type '{}'", row_number, &row[TYPE]);
            amount
        }
    };

    Transaction {
        date,
        description: row[DESCRIPTION].to_string(),
        original_description: row[ORIGINAL_DESCRIPTION].to_string(),
        amount,
        category: row[CATEGORY].to_string(),
        account_name: row[ACCOUNT_NAME].to_string(),
        labels: row[LABELS].to_string(),
        notes: row[NOTES].to_string(),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn parse_amount(s: &str) -> Option<f64> {
    s.replace(['$', ','], "").trim().parse::<f64>().ok().filter(|amount| amount.is_finite())
}

/// Date given to rows whose date cannot be parsed
fn default_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}
