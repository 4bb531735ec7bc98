//! Store writer
//!
//! Persisting a ledger renders it through the codec, seals it, obfuscates it
//! and stages it in the temp directory. Committing then backs up the live
//! file and renames the staged file over it. If anything fails the staged
//! file is removed and the live file is left as it was.

use std::path::{Path, PathBuf};

use crate::backup::BackupManager;
use crate::config::paths::LedgerPaths;
use crate::crypto::{obfuscate, obfuscation_collision};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Ledger;

use super::codec::Record;
use super::file_io::{remove_quietly, replace, write_synced};
use super::integrity::seal;

/// Records of a ledger in file order: accounts, transactions, budgets
fn records(ledger: &Ledger) -> impl Iterator<Item = Record> + '_ {
    ledger
        .accounts
        .iter()
        .cloned()
        .map(Record::Account)
        .chain(ledger.transactions.iter().cloned().map(Record::Transaction))
        .chain(ledger.budgets.iter().cloned().map(Record::Budget))
}

/// Render a ledger to plain lines joined by the line terminator
///
/// Transactions keep their in-memory order.
pub fn render(ledger: &Ledger) -> LedgerResult<String> {
    let mut lines = Vec::with_capacity(ledger.len());

    for record in records(ledger) {
        record
            .check_encodable()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        lines.push(record.encode());
    }

    Ok(lines.join("\n"))
}

/// Refuse text that would not reveal back to itself under `key`
pub(crate) fn check_storable(text: &str, key: i64) -> LedgerResult<()> {
    match obfuscation_collision(text, key) {
        Some(c) => Err(LedgerError::Validation(format!(
            "character {:?} turns into a separator with this key",
            c
        ))),
        None => Ok(()),
    }
}

/// A ledger written to its staging file but not yet in place
///
/// Dropping an uncommitted write removes the staging file.
#[derive(Debug)]
pub struct StagedWrite {
    paths: LedgerPaths,
    user_id: String,
    temp_path: PathBuf,
    keep_backup: bool,
    committed: bool,
}

impl StagedWrite {
    pub(crate) fn stage(
        paths: &LedgerPaths,
        keep_backup: bool,
        ledger: &Ledger,
        user_id: &str,
        key: i64,
    ) -> LedgerResult<Self> {
        let sealed = seal(&render(ledger)?);
        check_storable(&sealed, key)?;
        let contents = obfuscate(&sealed, key);

        let temp_path = paths.temp_file(user_id);
        if let Err(e) = write_synced(&temp_path, contents.as_bytes()) {
            remove_quietly(&temp_path);
            return Err(e);
        }

        tracing::debug!(
            user = user_id,
            records = ledger.len(),
            path = %temp_path.display(),
            "ledger staged"
        );

        Ok(Self {
            paths: paths.clone(),
            user_id: user_id.to_string(),
            temp_path,
            keep_backup,
            committed: false,
        })
    }

    /// Path of the staging file
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Back up the live file, then atomically move the staged file into place
    pub fn commit(mut self) -> LedgerResult<PathBuf> {
        let result = self.finish();
        self.committed = result.is_ok();
        result
    }

    fn finish(&self) -> LedgerResult<PathBuf> {
        if self.keep_backup {
            BackupManager::new(self.paths.clone()).backup_user(&self.user_id)?;
        }

        let live = self.paths.user_file(&self.user_id);
        replace(&self.temp_path, &live)?;

        tracing::info!(user = %self.user_id, path = %live.display(), "ledger persisted");
        Ok(live)
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed {
            remove_quietly(&self.temp_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Budget, Money, Transaction};
    use chrono::NaiveDate;

    #[test]
    fn test_render_order() {
        let ledger = Ledger {
            accounts: vec![Account::new("Compte A")],
            transactions: vec![
                Transaction::new(
                    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    "b",
                    "Compte A",
                    Money::from_cents(100),
                    "CB",
                ),
                Transaction::new(
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    "a",
                    "Compte A",
                    Money::from_cents(-100),
                    "CB",
                ),
            ],
            budgets: vec![Budget::new("Autres", Money::zero(), "Autres")],
        };

        assert_eq!(
            render(&ledger).unwrap(),
            "CPT*Compte A\n\
             OPE*01/03/2024*b*Compte A*1.00*CB*False*Autres\n\
             OPE*01/01/2024*a*Compte A*-1.00*CB*False*Autres\n\
             BUD*Autres*0.00*Autres"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&Ledger::new()).unwrap(), "");
    }

    #[test]
    fn test_collision_with_key_is_rejected() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let ledger = Ledger {
            accounts: vec![Account::new("Compte A")],
            ..Ledger::default()
        };

        // A space shifted by 10 becomes '*'
        let err = StagedWrite::stage(&paths, true, &ledger, "12345678", 10).unwrap_err();
        assert!(err.is_validation());
        assert!(!paths.temp_file("12345678").exists());

        let staged = StagedWrite::stage(&paths, true, &ledger, "12345678", 11).unwrap();
        assert!(staged.temp_path().exists());
    }

    #[test]
    fn test_render_rejects_separator_in_fields() {
        let ledger = Ledger {
            accounts: vec![Account::new("Compte*A")],
            ..Ledger::default()
        };

        let err = render(&ledger).unwrap_err();
        assert!(err.is_validation());
    }
}
