use std::collections::HashMap;
use log::warn;
use crate::ledger::LedgerEntry;
use crate::transaction::{IdentityFn, Transaction, TransactionId};


/// Difference between the current transactions and the ledger
#[derive(Debug, Default)]
pub(crate) struct Reconciliation<'a> {
    /// Transactions nobody decided on yet, in source order
    pub(crate) unassigned: Vec<&'a Transaction>,
    /// Ledger entries without a matching transaction, in ledger order. Usually the export changed or
    /// dropped a row after it was divvied.
    pub(crate) orphaned: Vec<&'a LedgerEntry>,
    /// Transactions matched with their ledger entry
    pub(crate) accounted: Vec<(&'a Transaction, &'a LedgerEntry)>,
    /// Earlier rows of the source shadowed by a later row with the same identity
    pub(crate) duplicates: Vec<&'a Transaction>,
}

/// Matches transactions with ledger entries by identity
pub(crate) struct Reconciler {
    identity: IdentityFn,
}

impl Reconciler {
    pub(crate) fn new() -> Reconciler {
        Reconciler { identity: Transaction::id }
    }

    pub(crate) fn with_identity(identity: IdentityFn) -> Reconciler {
        Reconciler { identity }
    }

    pub(crate) fn identity_of(&self, t: &Transaction) -> TransactionId {
        (self.identity)(t)
    }

    /// One pass over each side. Identities of the current transactions are indexed, the last row
    /// winning on duplicates. Each ledger entry claims its identity from the index; entries finding
    /// nothing to claim are orphaned. Whatever is left unclaimed is unassigned.
    pub(crate) fn reconcile<'a>(&self, transactions: &'a [Transaction], ledger: &'a [LedgerEntry]) -> Reconciliation<'a> {
        let mut index :HashMap<TransactionId, usize> = HashMap::with_capacity(transactions.len());
        let mut duplicates :Vec<usize> = vec![];
        for (position, t) in transactions.iter().enumerate() {
            if let Some(shadowed) = index.insert(self.identity_of(t), position) {
                warn!("Duplicate transaction {}, only the last one is considered", transactions[shadowed].abbr_string());
                duplicates.push(shadowed);
            }
        }

        let mut reconciliation = Reconciliation::default();
        for entry in ledger {
            match index.remove(&self.identity_of(&entry.transaction)) {
                Some(position) => reconciliation.accounted.push((&transactions[position], entry)),
                None => reconciliation.orphaned.push(entry),
            }
        }

        let mut unclaimed :Vec<usize> = index.into_values().collect();
        unclaimed.sort_unstable();
        reconciliation.unassigned = unclaimed.into_iter().map(|position| &transactions[position]).collect();

        duplicates.sort_unstable();
        reconciliation.duplicates = duplicates.into_iter().map(|position| &transactions[position]).collect();

        reconciliation
    }
}
