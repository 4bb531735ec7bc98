//! User CLI commands
//!
//! Every command here looks up the user's key in the credential index, which
//! is itself obfuscated with the global index key from the settings.

use crate::backup::{BackupManager, RestoreManager};
use crate::config::{paths::LedgerPaths, settings::Settings};
use crate::display::format_ledger;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::{CredentialIndex, LoadStatus, UserStore};

/// Resolve the shift key of `user_id` from the credential index
pub fn user_key(paths: &LedgerPaths, settings: &Settings, user_id: &str) -> LedgerResult<i64> {
    let index = CredentialIndex::load(paths.ident_file(), settings.index_key)?;
    Ok(index.require(user_id)?.key)
}

/// List the users of the credential index
pub fn handle_users_command(paths: &LedgerPaths, settings: &Settings) -> LedgerResult<()> {
    let index = CredentialIndex::load(paths.ident_file(), settings.index_key)?;

    if index.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!("Users");
    println!("=====");
    for credential in index.iter() {
        let marker = if paths.user_file(&credential.id).exists() {
            ""
        } else {
            " (no data)"
        };
        println!("  {}  {}{}", credential.id, credential.display_name, marker);
    }
    println!();
    println!("Total: {} user(s)", index.len());

    Ok(())
}

/// Check the integrity of a user's file
///
/// A missing or corrupt file is returned as an error so the process exits
/// non-zero.
pub fn handle_verify_command(
    paths: &LedgerPaths,
    settings: &Settings,
    user_id: &str,
) -> LedgerResult<()> {
    let key = user_key(paths, settings, user_id)?;
    let store = UserStore::with_settings(paths.clone(), settings);

    match store.verify(user_id, key)? {
        LoadStatus::Verified => {
            println!("{}: integrity OK", user_id);
            Ok(())
        }
        LoadStatus::Missing => Err(LedgerError::NotFound {
            entity_type: "User file",
            identifier: user_id.to_string(),
        }),
        LoadStatus::Corrupt(reason) => {
            if paths.backup_file(user_id).exists() {
                eprintln!("A backup exists. Try: ledger restore {}", user_id);
            }
            Err(reason.into())
        }
    }
}

/// Print the decoded ledger of a user
pub fn handle_show_command(
    paths: &LedgerPaths,
    settings: &Settings,
    user_id: &str,
    json: bool,
) -> LedgerResult<()> {
    let key = user_key(paths, settings, user_id)?;
    let store = UserStore::with_settings(paths.clone(), settings);
    let mut report = store.load(user_id, key)?;

    if let LoadStatus::Corrupt(reason) = &report.status {
        eprintln!("Warning: {} failed its integrity check ({})", user_id, reason);
    }
    if report.discarded > 0 {
        eprintln!("Warning: {} unreadable line(s) skipped", report.discarded);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report.ledger)?);
    } else {
        report.ledger.sort_transactions_by_date();
        print!("{}", format_ledger(&report.ledger, &settings.date_format));

        let dangling = report.ledger.dangling_references();
        if !dangling.is_empty() {
            println!();
            println!("{} dangling reference(s):", dangling.len());
            for reference in dangling {
                println!("  {}", reference);
            }
        }
    }

    Ok(())
}

/// Restore a user's live file from its backup
pub fn handle_restore_command(
    paths: &LedgerPaths,
    settings: &Settings,
    user_id: &str,
) -> LedgerResult<()> {
    let key = user_key(paths, settings, user_id)?;

    if let Some(info) = BackupManager::new(paths.clone()).backup_info(user_id)? {
        let modified = info
            .modified_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("Backup: {} ({} bytes, {})", info.path.display(), info.size_bytes, modified);
    }

    let result = RestoreManager::new(paths.clone()).restore_user(user_id, key)?;

    if result.replaced_existing {
        println!("Restored {} ({} bytes), live file replaced", result.user_id, result.bytes_restored);
    } else {
        println!("Restored {} ({} bytes)", result.user_id, result.bytes_restored);
    }

    Ok(())
}
