use std::fmt;
use anyhow::Context;
use log::info;
use crate::ledger::{Assignment, LedgerEntry, LedgerFile};
use crate::transaction::Transaction;


/// What to do with one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Decision {
    /// The named person pays for all of it
    Person(String),
    /// Everybody pays an equal share
    Split,
    /// Nobody pays. Recorded anyway so the transaction is not offered again.
    Skip,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Decision::Person(person) => f.write_str(person),
            Decision::Split => f.write_str("Split"),
            Decision::Skip => f.write_str("Skip"),
        }
    }
}

/// Supplies one decision per transaction, e.g. by asking the operator
pub(crate) trait DecisionSource {
    fn decide(&mut self, transaction: &Transaction, people: &[String]) -> anyhow::Result<Decision>;
}

/// Turn a decision into an assignment of the transaction amount.
///
/// A split divides the amount evenly by the number of people, without redistributing the rounding
/// remainder, so the shares may be off from the amount by a fraction of a cent.
pub(crate) fn apply_decision(transaction: &Transaction, decision: &Decision, people: &[String]) -> Assignment {
    match decision {
        Decision::Person(person) => Assignment::single(person, transaction.amount),
        Decision::Split => {
            let mut assignment = Assignment::new();
            if people.is_empty() {
                return assignment;
            }
            let share = transaction.amount / people.len() as f64;
            for person in people {
                assignment.insert(person, share);
            }
            assignment
        },
        Decision::Skip => Assignment::new(),
    }
}

/// Ask for a decision on each transaction and append the result to the ledger file.
/// Returns the number of entries written.
pub(crate) fn divvy_transactions(
    people: &[String],
    transactions: &[&Transaction],
    source: &mut dyn DecisionSource,
    ledger_file: &mut LedgerFile,
) -> anyhow::Result<usize> {
    let mut written = 0usize;
    for transaction in transactions {
        let decision = source.decide(transaction, people)
            .with_context(|| format!("failed to get a decision for {}", transaction.abbr_string()))?;
        let assignment = apply_decision(transaction, &decision, people);
        let assigned = assignment.total();

        ledger_file.write(&LedgerEntry { transaction: (*transaction).clone(), assignment })
            .with_context(|| format!("failed to write divvy for {}", transaction.abbr_string()))?;
        info!("{} -> {} ({:.2})", transaction.abbr_string(), decision, assigned);
        written += 1;
    }

    Ok(written)
}
