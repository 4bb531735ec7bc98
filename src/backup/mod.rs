//! Backup system for user files
//!
//! - `BackupManager`: copies the live file aside before it is replaced
//! - `RestoreManager`: validates a backup and puts it back in place
//!
//! Only the most recent previous version is kept. Each persist overwrites
//! the backup of that user.

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult};
