//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::LedgerError;

/// Read a file as bytes, returning `None` if it doesn't exist
pub fn read_if_exists<P: AsRef<Path>>(path: P) -> Result<Option<Vec<u8>>, LedgerError> {
    let path = path.as_ref();

    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LedgerError::Io(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Read a UTF-8 text file, returning an error if it doesn't exist
pub fn read_text_required<P: AsRef<Path>>(path: P) -> Result<String, LedgerError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LedgerError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    fs::read_to_string(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Write `contents` to `path`, flushed and synced to disk
///
/// Creates the parent directory on demand. The write is not atomic on its
/// own; use it for staging files.
pub fn write_synced<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), LedgerError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(path).map_err(|e| {
        LedgerError::Storage(format!("Failed to create {}: {}", path.display(), e))
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|e| LedgerError::Storage(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LedgerError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before any rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

/// Atomically move `staged` over `target`
pub fn replace<P: AsRef<Path>, Q: AsRef<Path>>(staged: P, target: Q) -> Result<(), LedgerError> {
    let (staged, target) = (staged.as_ref(), target.as_ref());

    fs::rename(staged, target).map_err(|e| {
        LedgerError::Storage(format!(
            "Failed to replace {} with {}: {}",
            target.display(),
            staged.display(),
            e
        ))
    })
}

/// Remove a file if it exists, ignoring errors
pub fn remove_quietly<P: AsRef<Path>>(path: P) {
    let path = path.as_ref();
    if path.exists() {
        let _ = fs::remove_file(path);
    }
}

/// Write text to a file atomically (write to a sibling temp file, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), LedgerError> {
    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    let result = write_synced(&temp_path, contents.as_bytes())
        .and_then(|()| replace(&temp_path, path));

    if result.is_err() {
        remove_quietly(&temp_path);
    }

    result
}
