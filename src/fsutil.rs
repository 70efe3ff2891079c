use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

/// True when both paths resolve to the same existing file.
#[must_use]
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

/// Create a temporary file next to `target` so it can later be renamed over it.
///
/// # Errors
/// Returns an error if the temporary file cannot be created in the target's directory.
pub fn temp_sibling(target: &Path) -> io::Result<NamedTempFile> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    tempfile::Builder::new().prefix(".csvsig-").suffix(".part").tempfile_in(dir)
}

/// Move a temporary file into place at `target`, replacing any existing file.
///
/// # Errors
/// Returns the underlying rename error.
pub fn persist(tmp: NamedTempFile, target: &Path) -> io::Result<()> {
    tmp.persist(target).map(|_| ()).map_err(|e| e.error)
}
