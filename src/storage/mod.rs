//! Storage layer for the ledger
//!
//! Each user's accounts, transactions and budgets live in one obfuscated,
//! hash-sealed text file. The pipeline is:
//!
//! ```text
//! Ledger -> codec lines -> seal (HASH line) -> obfuscate -> temp -> backup -> rename
//! ```
//!
//! and the reverse on load, with the integrity check before any decoding.
//! There is no file locking: two sessions persisting the same user race and
//! the last one wins.

pub mod codec;
pub mod credentials;
pub mod file_io;
pub mod integrity;
pub mod reader;
pub mod writer;

pub use codec::{DecodeError, EncodeError, Record};
pub use credentials::CredentialIndex;
pub use file_io::write_text_atomic;
pub use reader::{LoadReport, LoadStatus};
pub use writer::StagedWrite;

use std::path::PathBuf;

use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Ledger;

/// Read/write access to the per-user files under one data directory
#[derive(Debug, Clone)]
pub struct UserStore {
    paths: LedgerPaths,
    keep_backup: bool,
}

impl UserStore {
    /// Create a store that keeps a backup of the previous version
    pub fn new(paths: LedgerPaths) -> Self {
        Self {
            paths,
            keep_backup: true,
        }
    }

    /// Create a store configured from settings
    pub fn with_settings(paths: LedgerPaths, settings: &Settings) -> Self {
        Self {
            paths,
            keep_backup: settings.keep_backup,
        }
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load the ledger of `user_id`
    ///
    /// Integrity failures are reported through [`LoadStatus::Corrupt`] with
    /// an empty ledger, not as an error.
    pub fn load(&self, user_id: &str, key: i64) -> LedgerResult<LoadReport> {
        check_user_id(user_id)?;
        reader::load_file(&self.paths.user_file(user_id), key)
    }

    /// Check the integrity of the user file without keeping the ledger
    pub fn verify(&self, user_id: &str, key: i64) -> LedgerResult<LoadStatus> {
        Ok(self.load(user_id, key)?.status)
    }

    /// Render and stage the ledger without touching the live file
    pub fn stage(&self, ledger: &Ledger, user_id: &str, key: i64) -> LedgerResult<StagedWrite> {
        check_user_id(user_id)?;
        StagedWrite::stage(&self.paths, self.keep_backup, ledger, user_id, key)
    }

    /// Persist the whole ledger of `user_id`, replacing the live file
    ///
    /// On error the staging file is removed and the live file is unchanged.
    pub fn persist(&self, ledger: &Ledger, user_id: &str, key: i64) -> LedgerResult<PathBuf> {
        self.stage(ledger, user_id, key)?.commit()
    }
}

/// User ids become file names, so only plain alphanumeric ids are accepted
pub(crate) fn check_user_id(user_id: &str) -> LedgerResult<()> {
    if user_id.is_empty() || !user_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(LedgerError::Validation(format!(
            "invalid user id {:?}",
            user_id
        )));
    }
    Ok(())
}
