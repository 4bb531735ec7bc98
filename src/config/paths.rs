//! Path management for the ledger store
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGER_DATA_DIR` environment variable (if set)
//! 2. The platform data directory reported by `directories`
//!
//! ## Layout
//!
//! ```text
//! <base>/config.json
//! <base>/ident.txt
//! <base>/users/<id>.txt
//! <base>/users/temp/<id>.tmp
//! <base>/users/backup/<id>.bak
//! ```

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LedgerError;

/// Manages all paths used by the ledger store
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    /// Base directory for all ledger data
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Create a new LedgerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform data directory can be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = if let Ok(custom) = std::env::var("LEDGER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one obfuscated file per user
    pub fn users_dir(&self) -> PathBuf {
        self.base_dir.join("users")
    }

    /// Staging directory for writes in progress
    pub fn temp_dir(&self) -> PathBuf {
        self.users_dir().join("temp")
    }

    /// Directory holding the single previous version of each user file
    pub fn backup_dir(&self) -> PathBuf {
        self.users_dir().join("backup")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the shared credential index
    pub fn ident_file(&self) -> PathBuf {
        self.base_dir.join("ident.txt")
    }

    /// Live file of a user
    pub fn user_file(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{}.txt", user_id))
    }

    /// Staging file of a user
    pub fn temp_file(&self, user_id: &str) -> PathBuf {
        self.temp_dir().join(format!("{}.tmp", user_id))
    }

    /// Backup file of a user
    pub fn backup_file(&self, user_id: &str) -> PathBuf {
        self.backup_dir().join(format!("{}.bak", user_id))
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.temp_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create temp directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }

    /// Check if the store has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    ProjectDirs::from("", "", "ledger-cli")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| LedgerError::Config("Could not determine a data directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.users_dir(), temp_dir.path().join("users"));
        assert_eq!(paths.temp_dir(), temp_dir.path().join("users").join("temp"));
        assert_eq!(
            paths.backup_dir(),
            temp_dir.path().join("users").join("backup")
        );
    }

    #[test]
    fn test_user_file_paths() {
        let paths = LedgerPaths::with_base_dir(PathBuf::from("/data"));

        assert_eq!(
            paths.user_file("12345678"),
            PathBuf::from("/data/users/12345678.txt")
        );
        assert_eq!(
            paths.temp_file("12345678"),
            PathBuf::from("/data/users/temp/12345678.tmp")
        );
        assert_eq!(
            paths.backup_file("12345678"),
            PathBuf::from("/data/users/backup/12345678.bak")
        );
        assert_eq!(paths.ident_file(), PathBuf::from("/data/ident.txt"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.temp_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(!paths.is_initialized());
    }
}
