//! Document file access
//!
//! Thin wrappers over `std::fs` that attach the path to every failure so the
//! CLI can report which file was at fault.

use std::fs;
use std::path::Path;

use super::error::{FixError, FixResult};

/// Read a LaTeX source file as UTF-8
pub fn read_source(path: impl AsRef<Path>) -> FixResult<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| FixError::InputRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Write rewritten source, replacing any existing file
pub fn write_output(path: impl AsRef<Path>, content: &str) -> FixResult<()> {
    let path = path.as_ref();
    fs::write(path, content).map_err(|source| FixError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Whether two paths name the same file (falls back to comparing as written)
pub fn same_file(a: impl AsRef<Path>, b: impl AsRef<Path>) -> bool {
    let (a, b) = (a.as_ref(), b.as_ref());
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
