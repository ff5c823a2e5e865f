//! Atomic file replacement.

use std::fs;
use std::io::Write;
use std::path::Path;

use ledger_spi::{LedgerError, Result};

/// Replace `path` with `bytes` so readers see either the old file or the
/// complete new one.
///
/// The bytes go to a temp file in the destination directory, are synced,
/// and the temp file is renamed over `path`. On error the destination is
/// left as it was and the temp file is removed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<u64> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| LedgerError::io(dir, e))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".write-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| LedgerError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| LedgerError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| LedgerError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| LedgerError::io(path, e.error))?;

    Ok(bytes.len() as u64)
}
