use comfy_table::Table;
use crate::config::CheckHistoryConfig;
use crate::ledger::LedgerEntry;
use crate::reconcile::{Reconciler, Reconciliation};
use crate::report::new_table;
use crate::transaction::Transaction;

/// Print transactions missing from the history, and divvies in the history that no longer match a
/// transaction, typically because the export rewrote them after they were divvied.
pub(crate) fn run_check_history(reconciler: &Reconciler, transactions: &[Transaction], history: &[LedgerEntry], config: &CheckHistoryConfig) {
    let reconciliation = reconciler.reconcile(transactions, history);
    print!("{}", render(&reconciliation, config));
}

pub(crate) fn render(reconciliation: &Reconciliation, config: &CheckHistoryConfig) -> String {
    let mut out = String::new();

    out.push_str("Extra transactions:\n");
    out.push_str(&section(transactions_table(&reconciliation.unassigned)));

    let orphaned :Vec<&LedgerEntry> = reconciliation.orphaned.iter()
        .copied()
        .filter(|entry| !config.is_ignored(entry))
        .collect();
    out.push_str("Extra divvies in history:\n");
    out.push_str(&section(divvies_table(&orphaned)));

    if !reconciliation.duplicates.is_empty() {
        out.push_str("Duplicate transactions (only the last one is matched):\n");
        out.push_str(&section(transactions_table(&reconciliation.duplicates)));
    }

    out
}

fn section(table: Option<Table>) -> String {
    match table {
        Some(table) => format!("{}\n", table),
        None => "(none)\n".to_string(),
    }
}

fn transactions_table(transactions: &[&Transaction]) -> Option<Table> {
    if transactions.is_empty() {
        return None;
    }

    let mut table = new_table(vec!["Date", "Description", "Amount", "Account", "Category"]);
    for t in transactions {
        table.add_row(vec![
            t.date.to_string(),
            t.description.clone(),
            format!("{:.2}", t.amount),
            t.account_name.clone(),
            t.category.clone(),
        ]);
    }
    Some(table)
}

fn divvies_table(entries: &[&LedgerEntry]) -> Option<Table> {
    if entries.is_empty() {
        return None;
    }

    let mut table = new_table(vec!["Date", "Description", "Amount", "Account", "Assignment"]);
    for entry in entries {
        let t = &entry.transaction;
        let assignment = entry.assignment.iter()
            .map(|(person, amount)| format!("{}: {:.2}", person, amount))
            .collect::<Vec<String>>()
            .join(", ");
        table.add_row(vec![
            t.date.to_string(),
            t.description.clone(),
            format!("{:.2}", t.amount),
            t.account_name.clone(),
            assignment,
        ]);
    }
    Some(table)
}
