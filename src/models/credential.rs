//! Credential model
//!
//! One entry of the shared credential index. The per-user key stored here
//! parameterizes the obfuscation of that user's file.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Length of a user identifier
pub const ID_LEN: usize = 8;

/// Length of a user password
pub const PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Fixed-length numeric identifier, also the user file name
    pub id: String,

    /// Fixed-length numeric password
    #[serde(skip_serializing)]
    pub password: String,

    pub display_name: String,

    /// Obfuscation key of the user's file
    pub key: i64,
}

impl Credential {
    pub fn new(
        id: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
        key: i64,
    ) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
            display_name: display_name.into(),
            key,
        }
    }

    /// Validate the credential fields
    pub fn validate(&self) -> Result<(), LedgerError> {
        if !is_numeric_of_len(&self.id, ID_LEN) {
            return Err(LedgerError::Validation(format!(
                "identifier must be {} digits",
                ID_LEN
            )));
        }

        if !is_numeric_of_len(&self.password, PASSWORD_LEN) {
            return Err(LedgerError::Validation(format!(
                "password must be {} digits",
                PASSWORD_LEN
            )));
        }

        if self.display_name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "display name cannot be empty".into(),
            ));
        }

        if self.display_name.contains(['*', '\n']) {
            return Err(LedgerError::Validation(
                "display name cannot contain '*' or line breaks".into(),
            ));
        }

        Ok(())
    }
}

fn is_numeric_of_len(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credential() {
        let cred = Credential::new("12345678", "123456", "Marie", 12);
        assert!(cred.validate().is_ok());
    }

    #[test]
    fn test_invalid_credentials() {
        let cases = [
            Credential::new("1234567", "123456", "Marie", 1),
            Credential::new("1234567a", "123456", "Marie", 1),
            Credential::new("12345678", "12345", "Marie", 1),
            Credential::new("12345678", "12345x", "Marie", 1),
            Credential::new("12345678", "123456", "  ", 1),
            Credential::new("12345678", "123456", "Ma*rie", 1),
        ];

        for cred in cases {
            let err = cred.validate().unwrap_err();
            assert!(err.is_validation(), "{:?}", cred);
        }
    }

    #[test]
    fn test_password_not_serialized() {
        let cred = Credential::new("12345678", "123456", "Marie", 12);
        let json = serde_json::to_string(&cred).unwrap();
        assert!(!json.contains("123456\""));
        assert!(json.contains("Marie"));
    }
}
