//! Transaction model
//!
//! A dated movement on one account, optionally charged to a budget.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Budget label used by transactions that belong to no particular budget
pub const UNBUDGETED: &str = "Autres";

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date
    pub date: NaiveDate,

    /// Free-text description
    pub label: String,

    /// Name of the account this transaction belongs to
    pub account: String,

    /// Amount (positive for income, negative for expense)
    pub amount: Money,

    /// Payment mode tag, e.g. `CB`, `CHE` or `VIR`
    pub mode: String,

    /// Whether the transaction has been posted by the bank
    pub settled: bool,

    /// Label of the budget it is charged to, or [`UNBUDGETED`]
    pub budget: String,
}

impl Transaction {
    /// Create a pending, unbudgeted transaction
    pub fn new(
        date: NaiveDate,
        label: impl Into<String>,
        account: impl Into<String>,
        amount: Money,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            date,
            label: label.into(),
            account: account.into(),
            amount,
            mode: mode.into(),
            settled: false,
            budget: UNBUDGETED.to_string(),
        }
    }

    /// Builder-style budget assignment
    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = budget.into();
        self
    }

    /// Builder-style settled flag
    pub fn settled(mut self, settled: bool) -> Self {
        self.settled = settled;
        self
    }

    pub fn is_unbudgeted(&self) -> bool {
        super::account::names_match(&self.budget, UNBUDGETED)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%d/%m/%Y"),
            self.label,
            self.account,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rent() -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "loyer",
            "Compte A",
            Money::from_cents(-75000),
            "VIR",
        )
    }

    #[test]
    fn test_new_defaults() {
        let txn = rent();
        assert!(!txn.settled);
        assert_eq!(txn.budget, UNBUDGETED);
        assert!(txn.is_unbudgeted());
    }

    #[test]
    fn test_builders() {
        let txn = rent().with_budget("logement").settled(true);
        assert!(txn.settled);
        assert_eq!(txn.budget, "logement");
        assert!(!txn.is_unbudgeted());
    }

    #[test]
    fn test_display() {
        assert_eq!(rent().to_string(), "05/01/2024 loyer Compte A -750.00");
    }
}
