//! Transaction Table Module
//! Normalized statement rows shared by the aggregator and the presentation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money leaving the account
    Debit,
    /// Money entering the account
    Credit,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Debit => "debit",
            TransactionKind::Credit => "credit",
        }
    }
}

/// One normalized statement row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionKind,
    /// Always a positive magnitude; the direction is carried by `kind`.
    pub amount: f64,
    pub balance_after: f64,
}

/// Transactions of one sheet, in spreadsheet order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    pub sheet: String,
    pub transactions: Vec<Transaction>,
    /// Rows dropped because their movement date could not be parsed.
    pub skipped_rows: usize,
}

impl StatementTable {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn first(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    /// Rows of a single kind, keeping table order.
    pub fn of_kind(&self, kind: TransactionKind) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |t| t.kind == kind)
    }

    /// (date, balance) pairs for the balance-over-time chart.
    pub fn balance_series(&self) -> Vec<(NaiveDate, f64)> {
        self.transactions
            .iter()
            .map(|t| (t.date, t.balance_after))
            .collect()
    }
}
