use std::fs;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use chrono::NaiveDateTime;
use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use crate::ledger::{file_name_for, latest_file, load_file, LedgerEntry, LedgerError};

/// A ledger file opened for appending, for the duration of one run
pub(crate) struct LedgerFile {
    file: File,
    path: PathBuf,
}

impl LedgerFile {
    /// Create a new ledger file named after `now`. Fails with `AlreadyExists` rather than reusing a
    /// file created within the same second.
    pub(crate) fn create(dir: &Path, now: NaiveDateTime) -> Result<LedgerFile, LedgerError> {
        let path = dir.join(file_name_for(now));
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => LedgerError::AlreadyExists(path.clone()),
                _ => LedgerError::Io(path.clone(), e),
            })?;

        info!("Created ledger file {}", path.display());
        Ok(LedgerFile { file, path })
    }

    /// Open an existing ledger file in append-only mode
    pub(crate) fn open(path: &Path) -> Result<LedgerFile, LedgerError> {
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| LedgerError::Io(path.to_path_buf(), e))?;

        info!("Appending to ledger file {}", path.display());
        Ok(LedgerFile { file, path: path.to_path_buf() })
    }

    /// Open the most recent ledger file of the directory for appending
    pub(crate) fn continue_latest(dir: &Path) -> Result<LedgerFile, LedgerError> {
        match latest_file(dir)? {
            Some(path) => LedgerFile::open(&path),
            None => Err(LedgerError::NoLedgerFiles(dir.to_path_buf())),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry. The record goes out in a single write, so a crash can at most leave the
    /// last record incomplete.
    pub(crate) fn write(&mut self, entry: &LedgerEntry) -> Result<(), LedgerError> {
        let mut bytes = encode(entry)?;
        bytes.push(b'\n');
        self.file.write_all(&bytes).map_err(|e| LedgerError::Io(self.path.clone(), e))?;
        self.file.flush().map_err(|e| LedgerError::Io(self.path.clone(), e))
    }

    /// Close the file, deleting it if it holds no entries. Returns whether it was removed.
    pub(crate) fn remove_if_empty(self) -> Result<bool, LedgerError> {
        let LedgerFile { file, path } = self;
        drop(file);

        if !load_file(&path)?.is_empty() {
            return Ok(false);
        }

        fs::remove_file(&path).map_err(|e| LedgerError::Io(path.clone(), e))?;
        info!("Removed empty ledger file {}", path.display());
        Ok(true)
    }
}

fn encode(entry: &LedgerEntry) -> Result<Vec<u8>, LedgerError> {
    let mut bytes: Vec<u8> = vec![];
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
    entry.serialize(&mut serializer).map_err(LedgerError::Encode)?;
    Ok(bytes)
}
