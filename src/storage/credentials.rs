//! Shared credential index
//!
//! One line per user, `id*password*name*key`, obfuscated as a whole with the
//! global index key. Malformed lines are skipped on load.

use std::collections::BTreeMap;
use std::path::Path;

use crate::crypto::{obfuscate, reveal, LINE_TERMINATOR, RECORD_SEPARATOR};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Credential;

use super::file_io::{read_if_exists, write_text_atomic};
use super::writer::check_storable;

const CREDENTIAL_ARITY: usize = 4;

/// In-memory view of the credential index, keyed by user id
#[derive(Debug, Clone, Default)]
pub struct CredentialIndex {
    entries: BTreeMap<String, Credential>,
}

impl CredentialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index at `path`; a missing file is an empty index
    pub fn load<P: AsRef<Path>>(path: P, key: i64) -> LedgerResult<Self> {
        let path = path.as_ref();
        let bytes = match read_if_exists(path)? {
            Some(bytes) => bytes,
            None => {
                tracing::debug!(path = %path.display(), "no credential index, starting empty");
                return Ok(Self::new());
            }
        };

        let text = String::from_utf8(bytes).map_err(|_| {
            LedgerError::Storage(format!("{} is not valid UTF-8", path.display()))
        })?;

        Ok(Self::parse(&reveal(&text, key)))
    }

    /// Parse revealed index text
    pub fn parse(plain: &str) -> Self {
        let mut entries = BTreeMap::new();

        for line in plain.split(LINE_TERMINATOR) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match parse_line(line) {
                Some(credential) => {
                    entries.insert(credential.id.clone(), credential);
                }
                None => tracing::debug!("skipping malformed credential line"),
            }
        }

        Self { entries }
    }

    /// Render the index as plain text, one credential per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for c in self.entries.values() {
            out.push_str(&format!(
                "{}*{}*{}*{:02}",
                c.id, c.password, c.display_name, c.key
            ));
            out.push(LINE_TERMINATOR);
        }
        out
    }

    /// Atomically write the obfuscated index to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P, key: i64) -> LedgerResult<()> {
        let plain = self.render();
        check_storable(&plain, key)?;
        write_text_atomic(path, &obfuscate(&plain, key))
    }

    pub fn get(&self, id: &str) -> Option<&Credential> {
        self.entries.get(id)
    }

    /// Get a credential, or a not-found error
    pub fn require(&self, id: &str) -> LedgerResult<&Credential> {
        self.get(id).ok_or_else(|| LedgerError::user_not_found(id))
    }

    /// Add a new credential after validating it
    pub fn insert(&mut self, credential: Credential) -> LedgerResult<()> {
        credential.validate()?;

        if self.entries.contains_key(&credential.id) {
            return Err(LedgerError::Duplicate {
                entity_type: "User",
                identifier: credential.id,
            });
        }

        self.entries.insert(credential.id.clone(), credential);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<Credential> {
        self.entries.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> Option<Credential> {
    let fields: Vec<&str> = line.split(RECORD_SEPARATOR).collect();
    if fields.len() != CREDENTIAL_ARITY {
        return None;
    }

    let key = fields[3].trim().parse::<i64>().ok()?;
    Some(Credential::new(fields[0], fields[1], fields[2], key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_skips_malformed_lines() {
        let index = CredentialIndex::parse(
            "12345678*123456*Marie*07\n\
             bad line\n\
             23456789*654321*Paul*xx\n\
             34567890*111111*Leila*25\n",
        );

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("12345678").unwrap().key, 7);
        assert_eq!(index.get("34567890").unwrap().display_name, "Leila");
        assert!(index.get("23456789").is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ident.txt");

        let mut index = CredentialIndex::new();
        index
            .insert(Credential::new("12345678", "123456", "Marie", 12))
            .unwrap();
        index
            .insert(Credential::new("87654321", "654321", "Hugo", 3))
            .unwrap();
        index.save(&path, 23).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("Marie"));

        let loaded = CredentialIndex::load(&path, 23).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.require("87654321").unwrap().password, "654321");
        assert!(loaded.require("00000000").unwrap_err().is_not_found());
    }

    #[test]
    fn test_missing_index_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let index = CredentialIndex::load(temp_dir.path().join("ident.txt"), 23).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_insert_rejects_duplicates_and_invalid() {
        let mut index = CredentialIndex::new();
        index
            .insert(Credential::new("12345678", "123456", "Marie", 12))
            .unwrap();

        let dup = index.insert(Credential::new("12345678", "000000", "Jean", 1));
        assert!(matches!(dup, Err(LedgerError::Duplicate { .. })));

        let invalid = index.insert(Credential::new("123", "000000", "Jean", 1));
        assert!(invalid.unwrap_err().is_validation());
    }

    #[test]
    fn test_save_refuses_unreadable_index() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ident.txt");

        let mut index = CredentialIndex::new();
        index
            .insert(Credential::new("12345678", "123456", "Marie Anne", 7))
            .unwrap();

        assert!(index.save(&path, 10).unwrap_err().is_validation());
        assert!(!path.exists());
        index.save(&path, 23).unwrap();
        assert_eq!(CredentialIndex::load(&path, 23).unwrap().len(), 1);
    }

    #[test]
    fn test_render_format() {
        let mut index = CredentialIndex::new();
        index
            .insert(Credential::new("12345678", "123456", "Marie", 7))
            .unwrap();
        assert_eq!(index.render(), "12345678*123456*Marie*07\n");
    }
}
