//! Backup restoration for user files
//!
//! A backup is only restored after it passes the integrity check with the
//! user's key. The restore goes through the staging file and an atomic
//! rename, like a normal persist.

use std::fs;

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::file_io::{remove_quietly, replace, write_synced};
use crate::storage::check_user_id;
use crate::storage::integrity;

/// Handles restoring user files from their backup
pub struct RestoreManager {
    paths: LedgerPaths,
}

/// Result of a restore operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreResult {
    pub user_id: String,
    /// Bytes written to the live file
    pub bytes_restored: u64,
    /// Whether a live file was replaced (false if none existed)
    pub replaced_existing: bool,
}

impl RestoreManager {
    pub fn new(paths: LedgerPaths) -> Self {
        Self { paths }
    }

    /// Check the backup of `user_id` without restoring it
    pub fn validate_backup(&self, user_id: &str, key: i64) -> LedgerResult<()> {
        let contents = self.read_backup(user_id)?;
        integrity::verify(&contents, key)?;
        Ok(())
    }

    /// Replace the live file of `user_id` with its verified backup
    pub fn restore_user(&self, user_id: &str, key: i64) -> LedgerResult<RestoreResult> {
        let contents = self.read_backup(user_id)?;
        integrity::verify(&contents, key)?;

        let live = self.paths.user_file(user_id);
        let temp = self.paths.temp_file(user_id);
        let replaced_existing = live.exists();

        let result = write_synced(&temp, contents.as_bytes()).and_then(|()| replace(&temp, &live));
        if let Err(e) = result {
            remove_quietly(&temp);
            return Err(e);
        }

        tracing::info!(user = user_id, "live file restored from backup");

        Ok(RestoreResult {
            user_id: user_id.to_string(),
            bytes_restored: contents.len() as u64,
            replaced_existing,
        })
    }

    fn read_backup(&self, user_id: &str) -> LedgerResult<String> {
        check_user_id(user_id)?;
        let path = self.paths.backup_file(user_id);
        if !path.exists() {
            return Err(LedgerError::backup_not_found(user_id));
        }

        let bytes = fs::read(&path)
            .map_err(|e| LedgerError::Io(format!("Failed to read backup file: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|_| LedgerError::Integrity(crate::error::IntegrityError::InvalidEncoding))
    }
}
