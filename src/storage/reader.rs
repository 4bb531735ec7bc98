//! Store reader
//!
//! Loading verifies the integrity envelope before decoding anything. A file
//! that fails the check yields an empty ledger and a corrupt status instead
//! of an error, so callers can decide how to treat an unreadable user.

use crate::crypto::{reveal, LINE_TERMINATOR};
use crate::error::{IntegrityError, LedgerResult};
use crate::models::Ledger;

use super::codec::Record;
use super::file_io::read_if_exists;
use super::integrity::{unseal, verify_plain};

/// Outcome of the integrity check of a user file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The hash matched
    Verified,
    /// No file exists for this user yet
    Missing,
    /// The file failed verification; the ledger is empty
    Corrupt(IntegrityError),
}

/// Result of loading a user file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub status: LoadStatus,
    /// Lines dropped because they did not decode
    pub discarded: usize,
}

impl LoadReport {
    fn empty(status: LoadStatus) -> Self {
        Self {
            ledger: Ledger::default(),
            status,
            discarded: 0,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self.status, LoadStatus::Corrupt(_))
    }
}

/// Decode plain content (hash line already removed) into a ledger
///
/// Lines are routed by tag regardless of their position. Lines that fail to
/// decode are skipped and counted; blank lines are skipped silently.
pub fn decode_ledger(content: &str) -> (Ledger, usize) {
    let mut ledger = Ledger::default();
    let mut discarded = 0;

    for (number, line) in content.split(LINE_TERMINATOR).enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match Record::decode(line) {
            Ok(Record::Account(account)) => ledger.accounts.push(account),
            Ok(Record::Transaction(txn)) => ledger.transactions.push(txn),
            Ok(Record::Budget(budget)) => ledger.budgets.push(budget),
            Err(e) => {
                tracing::debug!(line = number + 1, error = %e, "discarding malformed line");
                discarded += 1;
            }
        }
    }

    (ledger, discarded)
}

/// Read, reveal and verify the file at `path`
pub(crate) fn load_file(path: &std::path::Path, key: i64) -> LedgerResult<LoadReport> {
    let bytes = match read_if_exists(path)? {
        Some(bytes) => bytes,
        None => return Ok(LoadReport::empty(LoadStatus::Missing)),
    };

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => return Ok(corrupt(path, IntegrityError::InvalidEncoding)),
    };

    let plain = reveal(&text, key);
    if let Err(err) = verify_plain(&plain) {
        return Ok(corrupt(path, err));
    }

    let (content, _) = unseal(&plain)?;
    let (ledger, discarded) = decode_ledger(content);

    Ok(LoadReport {
        ledger,
        status: LoadStatus::Verified,
        discarded,
    })
}

fn corrupt(path: &std::path::Path, err: IntegrityError) -> LoadReport {
    tracing::warn!(path = %path.display(), error = %err, "user file is altered or corrupt");
    LoadReport::empty(LoadStatus::Corrupt(err))
}
