use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use log::{info, warn};
use walkdir::{DirEntry, WalkDir};
use crate::ledger::{parse_file_name, LedgerEntry, LedgerError};

/// Decode every entry of a ledger file, in the order they were written.
///
/// Stops at end of file. A record that fails to decode fails the whole file instead of truncating it.
pub(crate) fn load_file(path: &Path) -> Result<Vec<LedgerEntry>, LedgerError> {
    let file = File::open(path).map_err(|e| LedgerError::Io(path.to_path_buf(), e))?;
    let stream = serde_json::Deserializer::from_reader(BufReader::new(file)).into_iter::<LedgerEntry>();

    let mut entries :Vec<LedgerEntry> = vec![];
    for entry in stream {
        entries.push(entry.map_err(|e| LedgerError::Decode(path.to_path_buf(), e))?);
    }

    Ok(entries)
}

/// Load the whole ledger: the entries of every ledger file in the directory, one file after another
pub(crate) fn load_dir(dir: &Path) -> Result<Vec<LedgerEntry>, LedgerError> {
    let mut entries :Vec<LedgerEntry> = vec![];
    for path in ledger_files(dir)? {
        let file_entries = load_file(&path)?;
        info!("Loaded {} divvies from {}", file_entries.len(), path.display());
        entries.extend(file_entries);
    }

    Ok(entries)
}

/// The ledger file with the latest creation time, judging by file names.
/// Files whose name is not a creation time are ignored.
pub(crate) fn latest_file(dir: &Path) -> Result<Option<PathBuf>, LedgerError> {
    let mut latest :Option<(chrono::NaiveDateTime, PathBuf)> = None;
    for path in ledger_files(dir)? {
        let created = path.file_name()
            .and_then(|name| name.to_str())
            .and_then(parse_file_name);

        match created {
            Some(created) => {
                if latest.as_ref().map_or(true, |(latest_created, _)| created > *latest_created) {
                    latest = Some((created, path));
                }
            },
            None => warn!("Unable to get creation time of '{}', skipping", path.display())
        }
    }

    Ok(latest.map(|(_, path)| path))
}

/// List files directly inside the ledger directory, sorted by name.
/// Hidden entries and subdirectories are skipped.
fn ledger_files(dir: &Path) -> Result<Vec<PathBuf>, LedgerError> {
    if !dir.is_dir() {
        return Err(LedgerError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = vec![];
    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| LedgerError::Io(dir.to_path_buf(), e.into()))?;
        let name = entry.file_name().to_string_lossy();
        if is_hidden(&entry) {
            info!("'{}' is hidden, skipping", name);
            continue;
        }
        if entry.file_type().is_dir() {
            info!("'{}' is not a file, skipping", name);
            continue;
        }

        files.push(entry.into_path());
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}
