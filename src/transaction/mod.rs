use std::fmt;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};


/// One financial event imported from a transaction export.
///
/// The sign of `amount` carries the direction: negative for debits, positive for credits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct Transaction {
    pub(crate) date: NaiveDate,
    pub(crate) description: String,
    pub(crate) original_description: String,
    pub(crate) amount: f64,
    pub(crate) category: String,
    pub(crate) account_name: String,
    pub(crate) labels: String,
    pub(crate) notes: String,
}

/// Key used to match a transaction across repeated exports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct TransactionId(String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TransactionId {
    fn from(s: String) -> Self {
        TransactionId(s)
    }
}

/// Derives the matching key of a transaction.
pub(crate) type IdentityFn = fn(&Transaction) -> TransactionId;

impl Transaction {
    /// Identity built from date, amount and description only, so that edits to category, account,
    /// labels or notes in the export do not make a transaction look new.
    ///
    /// Two distinct transactions on the same day with the same amount and description share an id.
    pub(crate) fn id(&self) -> TransactionId {
        TransactionId::from(self.abbr_string())
    }

    /// Identity that also tells apart accounts, for exports where the same purchase shows up on two
    /// accounts on the same day
    pub(crate) fn id_with_account(&self) -> TransactionId {
        TransactionId::from(format!("{} [{}]", self.abbr_string(), self.account_name))
    }

    /// Single line summary, e.g. `2023-01-01 $-4.5 'Coffee'`
    pub(crate) fn abbr_string(&self) -> String {
        format!("{} ${} '{}'", self.date.format("%Y-%m-%d"), self.amount, self.description)
    }

    /// Midnight at the start of the transaction date
    pub(crate) fn timestamp(&self) -> NaiveDateTime {
        self.date.and_hms_opt(0, 0, 0).unwrap_or_default()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Transaction:")?;
        writeln!(f, "  Date:                  {}", self.date.format("%Y-%m-%d"))?;
        writeln!(f, "  Description:           {}", self.description)?;
        writeln!(f, "  Original Description:  {}", self.original_description)?;
        writeln!(f, "  Amount:                {:.2}", self.amount)?;
        writeln!(f, "  Category:              {}", self.category)?;
        writeln!(f, "  Account Name:          {}", self.account_name)?;
        writeln!(f, "  Labels:                {}", self.labels)?;
        write!(f, "  Notes:                 {}", self.notes)
    }
}

/// Direction column of the export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransactionType {
    Debit,
    Credit,
}

impl TransactionType {
    pub(crate) fn parse(s: &str) -> Option<TransactionType> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debit" => Some(TransactionType::Debit),
            "credit" => Some(TransactionType::Credit),
            _ => None,
        }
    }

    /// Applies the direction to an amount, whatever sign it was written with.
    pub(crate) fn signed(&self, amount: f64) -> f64 {
        match self {
            TransactionType::Debit => -amount.abs(),
            TransactionType::Credit => amount.abs(),
        }
    }
}

/// Splits transactions into those old enough to be final and those still pending.
///
/// A transaction is settled when the start of its date lies strictly before `now - settlement_period`.
/// Banks often rewrite the date or description of a pending transaction when it settles, which would
/// make it look like a new one. A period reaching back beyond the earliest representable date
/// leaves everything pending.
pub(crate) fn split_settled(transactions: Vec<Transaction>, settlement_period: chrono::Duration, now: NaiveDateTime)
    -> (Vec<Transaction>, Vec<Transaction>) {
    match now.checked_sub_signed(settlement_period) {
        Some(settled_before) => transactions.into_iter().partition(|t| t.timestamp() < settled_before),
        None => (vec![], transactions),
    }
}
