//! Append-only ledger of divvy decisions.
//!
//! Every run writes to one ledger file in the ledger directory. A file is named after the time it was
//! created, e.g. `2023-01-31-18-04-59`, and holds one pretty printed JSON record per decision. The
//! ledger is the union of all records in all (non-hidden) files of the directory; there is no index
//! file, so the directory can be inspected and versioned by hand.

mod entry;
mod file;
mod loader;

#[cfg(test)]
mod tests;

use std::{fmt, io};
use std::path::PathBuf;
use chrono::NaiveDateTime;

pub(crate) use entry::{Assignment, LedgerEntry};
pub(crate) use file::LedgerFile;
pub(crate) use loader::{latest_file, load_dir, load_file};

/// Ledger file names are creation times in this format, so that they sort chronologically
const FILE_NAME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

#[derive(Debug)]
pub(crate) enum LedgerError {
    /// A ledger file with the same name exists already. Names have a resolution of one second.
    AlreadyExists(PathBuf),
    /// Asked to continue the latest ledger file but the directory has none
    NoLedgerFiles(PathBuf),
    NotADirectory(PathBuf),
    Io(PathBuf, io::Error),
    Decode(PathBuf, serde_json::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedgerError::AlreadyExists(path) =>
                write!(f, "ledger file '{}' already exists", path.display()),
            LedgerError::NoLedgerFiles(dir) =>
                write!(f, "no ledger file to continue in '{}'", dir.display()),
            LedgerError::NotADirectory(path) =>
                write!(f, "'{}' is not a directory", path.display()),
            LedgerError::Io(path, _) =>
                write!(f, "i/o error on '{}'", path.display()),
            LedgerError::Decode(path, _) =>
                write!(f, "failed to decode divvy from ledger file '{}'", path.display()),
            LedgerError::Encode(_) =>
                write!(f, "failed to encode divvy"),
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerError::Io(_, e) => Some(e),
            LedgerError::Decode(_, e) | LedgerError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

pub(crate) fn file_name_for(created: NaiveDateTime) -> String {
    created.format(FILE_NAME_FORMAT).to_string()
}

/// Creation time encoded in a ledger file name
pub(crate) fn parse_file_name(name: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(name, FILE_NAME_FORMAT).ok()
}
