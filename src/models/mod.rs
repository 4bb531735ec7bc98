//! Core data models of the ledger
//!
//! Accounts, transactions and budgets of a user, plus the credential entry
//! that carries the user's obfuscation key.

pub mod account;
pub mod budget;
pub mod credential;
pub mod ledger;
pub mod money;
pub mod transaction;

pub use account::Account;
pub use budget::Budget;
pub use credential::Credential;
pub use ledger::{DanglingReference, Ledger};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, UNBUDGETED};
