//! In-memory ledger of one user
//!
//! A session loads the whole ledger, mutates it and persists it back in one
//! piece. The store itself does not enforce name uniqueness or references;
//! the helpers here let calling code check them before persisting.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Account, Budget, Transaction};

/// Accounts, transactions and budgets of one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

/// A transaction field naming something that does not exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DanglingReference {
    Account { transaction: usize, name: String },
    Budget { transaction: usize, label: String },
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DanglingReference::Account { transaction, name } => {
                write!(f, "transaction #{} uses unknown account '{}'", transaction, name)
            }
            DanglingReference::Budget { transaction, label } => {
                write!(f, "transaction #{} uses unknown budget '{}'", transaction, label)
            }
        }
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.transactions.is_empty() && self.budgets.is_empty()
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.accounts.len() + self.transactions.len() + self.budgets.len()
    }

    pub fn has_account(&self, name: &str) -> bool {
        self.accounts.iter().any(|a| a.is_named(name))
    }

    pub fn has_budget(&self, label: &str) -> bool {
        self.budgets.iter().any(|b| b.is_labelled(label))
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.is_named(name))
    }

    pub fn budget(&self, label: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.is_labelled(label))
    }

    /// Sort transactions by date, keeping insertion order for equal dates
    pub fn sort_transactions_by_date(&mut self) {
        self.transactions.sort_by_key(|t| t.date);
    }

    /// Transaction references to accounts or budgets that are missing
    ///
    /// Transactions charged to the catch-all label are never reported.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();

        for (i, txn) in self.transactions.iter().enumerate() {
            if !self.has_account(&txn.account) {
                dangling.push(DanglingReference::Account {
                    transaction: i,
                    name: txn.account.clone(),
                });
            }

            if !txn.is_unbudgeted() && !self.has_budget(&txn.budget) {
                dangling.push(DanglingReference::Budget {
                    transaction: i,
                    label: txn.budget.clone(),
                });
            }
        }

        dangling
    }
}
