use std::fs;
use std::path::Path;
use anyhow::{bail, Context};
use chrono::{Duration, NaiveDateTime};
use log::info;
use crate::csv_reader;
use crate::ledger;
use crate::report;
use crate::transaction::{split_settled, Transaction};

mod check_history;
mod divvy;


pub(crate) use check_history::run_check_history;
pub(crate) use divvy::run_divvy;

/// Print the totals of a single ledger file
pub(crate) fn run_sum(ledger_file: &Path) -> anyhow::Result<()> {
    let entries = ledger::load_file(ledger_file).context("failed to load ledger file for sum")?;
    report::print_totals(&entries);
    Ok(())
}

/// Make sure the ledger directory exists, creating it on first use
pub(crate) fn prepare_history_dir(history_dir: &Path) -> anyhow::Result<()> {
    if !history_dir.exists() {
        fs::create_dir_all(history_dir)
            .with_context(|| format!("failed to create history directory '{}'", history_dir.display()))?;
        info!("Created history directory {}", history_dir.display());
    } else if !history_dir.is_dir() {
        bail!("'{}' is not a directory", history_dir.display());
    }
    Ok(())
}

/// Read the transaction export, keeping only transactions older than the settlement period
pub(crate) fn load_transactions(path: &Path, settlement_period: Duration, now: NaiveDateTime) -> anyhow::Result<Vec<Transaction>> {
    if settlement_period < Duration::zero() {
        bail!("settlement period cannot be negative");
    }

    let transactions = csv_reader::read_transactions(path).context("failed to load transactions")?;
    let (settled, pending) = split_settled(transactions, settlement_period, now);

    if !pending.is_empty() {
        info!("Pending transactions ignored:");
        for t in &pending {
            info!("    {}", t.id());
        }
    }

    Ok(settled)
}
