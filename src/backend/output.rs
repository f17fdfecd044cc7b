//! Idempotent output writing.

use std::fs;
use std::io;
use std::path::Path;

/// What [`write_if_changed`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The destination already held identical bytes; its modification time is untouched.
    Unchanged,
}

/// Write `contents` to `path` unless the file already holds exactly those bytes.
///
/// Missing parent directories are created.
pub fn write_if_changed(path: &Path, contents: &[u8]) -> io::Result<WriteOutcome> {
    match fs::read(path) {
        Ok(existing) if existing == contents => {
            tracing::debug!(path = %path.display(), "output unchanged, skipping write");
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(WriteOutcome::Written)
}
