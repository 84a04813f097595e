use std::path::Path;
use anyhow::Context;
use chrono::NaiveDateTime;
use log::info;
use crate::divvy::{divvy_transactions, DecisionSource};
use crate::ledger::{load_file, LedgerEntry, LedgerFile};
use crate::reconcile::Reconciler;
use crate::report;
use crate::transaction::Transaction;

/// Ask for a decision on every transaction not in the history yet, then print the totals of the
/// ledger file written to. A ledger file left without entries is deleted.
///
/// Returns the number of divvies written.
pub(crate) fn run_divvy(
    history_dir: &Path,
    continue_last_file: bool,
    now: NaiveDateTime,
    people: &[String],
    reconciler: &Reconciler,
    transactions: &[Transaction],
    history: &[LedgerEntry],
    source: &mut dyn DecisionSource,
) -> anyhow::Result<usize> {
    let mut ledger_file = if continue_last_file {
        LedgerFile::continue_latest(history_dir).context("failed to open latest history file")?
    } else {
        LedgerFile::create(history_dir, now).context("failed to create new history file")?
    };
    let path = ledger_file.path().to_path_buf();
    println!("history file: {}", path.display());

    let reconciliation = reconciler.reconcile(transactions, history);
    info!("{} transactions already divvied, {} to divvy", reconciliation.accounted.len(), reconciliation.unassigned.len());

    let divvied = divvy_transactions(people, &reconciliation.unassigned, source, &mut ledger_file);
    let removed = ledger_file.remove_if_empty();
    let written = divvied.context("failed to divvy transactions")?;
    if removed.context("failed to clean up history file")? {
        println!("no new transactions found");
        return Ok(written);
    }

    let entries = load_file(&path)
        .with_context(|| format!("failed to open history file '{}' for reporting", path.display()))?;
    println!();
    report::print_totals(&entries);

    Ok(written)
}
