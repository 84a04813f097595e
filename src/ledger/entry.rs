use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::transaction::Transaction;

/// How much of a transaction each person is responsible for.
///
/// Keys are kept sorted so that ledger files are stable and diff cleanly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub(crate) struct Assignment(BTreeMap<String, f64>);

impl Assignment {
    /// The empty assignment: looked at, nobody pays
    pub(crate) fn new() -> Assignment {
        Assignment(BTreeMap::new())
    }

    pub(crate) fn single(person: &str, amount: f64) -> Assignment {
        let mut assignment = Assignment::new();
        assignment.insert(person, amount);
        assignment
    }

    pub(crate) fn insert(&mut self, person: &str, amount: f64) {
        self.0.insert(person.to_string(), amount);
    }

    pub(crate) fn get(&self, person: &str) -> Option<f64> {
        self.0.get(person).copied()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(person, amount)| (person.as_str(), *amount))
    }

    pub(crate) fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

/// A divvy: one transaction and the decision taken for it. Never modified once written.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct LedgerEntry {
    pub(crate) transaction: Transaction,
    pub(crate) assignment: Assignment,
}
