//! Backup manager for user files
//!
//! Each user has at most one backup: the live file as it was before the most
//! recent persist. Every new backup overwrites the previous one.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};

/// Metadata about a user backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was last written
    pub modified_at: Option<DateTime<Utc>>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Manages the single-generation backup of each user file
#[derive(Debug, Clone)]
pub struct BackupManager {
    paths: LedgerPaths,
}

impl BackupManager {
    pub fn new(paths: LedgerPaths) -> Self {
        Self { paths }
    }

    /// Copy the live file of `user_id` to its backup path
    ///
    /// Returns `None` when there is no live file yet.
    pub fn backup_user(&self, user_id: &str) -> LedgerResult<Option<PathBuf>> {
        let live = self.paths.user_file(user_id);
        if !live.exists() {
            return Ok(None);
        }

        let backup_path = self.paths.backup_file(user_id);
        fs::create_dir_all(self.paths.backup_dir()).map_err(|e| {
            LedgerError::Storage(format!("Failed to create backup directory: {}", e))
        })?;

        fs::copy(&live, &backup_path).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to back up {} to {}: {}",
                live.display(),
                backup_path.display(),
                e
            ))
        })?;

        tracing::debug!(user = user_id, path = %backup_path.display(), "backup written");
        Ok(Some(backup_path))
    }

    /// Describe the backup of `user_id`, if any
    pub fn backup_info(&self, user_id: &str) -> LedgerResult<Option<BackupInfo>> {
        let path = self.paths.backup_file(user_id);
        if !path.exists() {
            return Ok(None);
        }

        let metadata = fs::metadata(&path)
            .map_err(|e| LedgerError::Io(format!("Failed to read backup metadata: {}", e)))?;

        Ok(Some(BackupInfo {
            modified_at: metadata.modified().ok().map(DateTime::<Utc>::from),
            size_bytes: metadata.len(),
            path,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, LedgerPaths, BackupManager) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let manager = BackupManager::new(paths.clone());
        (temp_dir, paths, manager)
    }

    #[test]
    fn test_no_live_file_no_backup() {
        let (_temp_dir, paths, manager) = setup();

        assert_eq!(manager.backup_user("12345678").unwrap(), None);
        assert!(!paths.backup_file("12345678").exists());
        assert!(manager.backup_info("12345678").unwrap().is_none());
    }

    #[test]
    fn test_backup_overwrites_previous() {
        let (_temp_dir, paths, manager) = setup();
        fs::create_dir_all(paths.users_dir()).unwrap();

        fs::write(paths.user_file("12345678"), "first").unwrap();
        manager.backup_user("12345678").unwrap();

        fs::write(paths.user_file("12345678"), "second").unwrap();
        let path = manager.backup_user("12345678").unwrap().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let info = manager.backup_info("12345678").unwrap().unwrap();
        assert_eq!(info.size_bytes, 6);
        assert_eq!(info.path, paths.backup_file("12345678"));
    }
}
