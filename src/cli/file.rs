//! Whole-file obfuscation commands
//!
//! `ledger encrypt` and `ledger decrypt` shift every character of a text
//! file in place. The rewrite goes through a temporary file and a rename, so
//! an interrupted run leaves the original intact.

use std::path::Path;

use crate::config::settings::Settings;
use crate::crypto::{obfuscate, obfuscation_collision, reveal, reveal_collision};
use crate::error::{LedgerError, LedgerResult};
use crate::storage::file_io::read_text_required;
use crate::storage::write_text_atomic;

/// Direction of a whole-file transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Encrypt,
    Decrypt,
}

impl FileAction {
    fn apply(self, text: &str, key: i64) -> String {
        match self {
            FileAction::Encrypt => obfuscate(text, key),
            FileAction::Decrypt => reveal(text, key),
        }
    }

    /// First character that would not survive the reverse transform
    fn collision(self, text: &str, key: i64) -> Option<char> {
        match self {
            FileAction::Encrypt => obfuscation_collision(text, key),
            FileAction::Decrypt => reveal_collision(text, key),
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            FileAction::Encrypt => "Encrypted",
            FileAction::Decrypt => "Decrypted",
        }
    }
}

/// Handle `encrypt` / `decrypt`; the key defaults to the global index key
pub fn handle_file_command(
    settings: &Settings,
    action: FileAction,
    path: &Path,
    key: Option<i64>,
) -> LedgerResult<()> {
    let key = key.unwrap_or(settings.index_key);
    let chars = transform_file(path, action, key)?;

    println!("{} {} ({} characters)", action.past_tense(), path.display(), chars);
    Ok(())
}

/// Rewrite `path` with the transformed text, returning its character count
pub fn transform_file(path: &Path, action: FileAction, key: i64) -> LedgerResult<usize> {
    let text = read_text_required(path)?;
    if let Some(c) = action.collision(&text, key) {
        return Err(LedgerError::Validation(format!(
            "{} contains {:?}, which turns into a separator with key {}",
            path.display(),
            c,
            key
        )));
    }

    let transformed = action.apply(&text, key);
    write_text_atomic(path, &transformed)?;

    tracing::info!(path = %path.display(), ?action, "file transformed");
    Ok(transformed.chars().count())
}
