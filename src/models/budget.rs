//! Budget model
//!
//! A monthly spending cap attached to one account.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A category budget of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Label, unique per user ignoring case
    pub label: String,

    /// Monthly cap
    pub cap: Money,

    /// Name of the associated account
    pub account: String,
}

impl Budget {
    pub fn new(label: impl Into<String>, cap: Money, account: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            cap,
            account: account.into(),
        }
    }

    /// Case-insensitive label comparison
    pub fn is_labelled(&self, label: &str) -> bool {
        super::account::names_match(&self.label, label)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} / month, {})", self.label, self.cap, self.account)
    }
}
