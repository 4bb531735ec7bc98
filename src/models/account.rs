//! Account model
//!
//! A bank account is identified by its display name only. Its balance is
//! derived from the transactions that reference it and is never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bank account of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Display name, unique per user ignoring case
    pub name: String,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Account {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Compare two user-facing names the way uniqueness is enforced
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_named_ignores_case() {
        let account = Account::new("Compte Épargne");
        assert!(account.is_named("compte épargne"));
        assert!(account.is_named("COMPTE ÉPARGNE"));
        assert!(!account.is_named("Compte A"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Account::from("Compte A").to_string(), "Compte A");
    }
}
