//! Atomic file replacement.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Writes `contents` to `path` without ever exposing a partial file.
///
/// The bytes go to a uniquely named temp file in the same directory, are
/// flushed to disk, and the temp file is renamed over `path`.  On any error
/// the temp file is removed and the previous content of `path` is untouched.
/// The parent directory is not created.
///
/// An existing `path` is resolved first, so a symlinked file is replaced at
/// its real location and the link survives.  The existing file's permissions
/// carry over to the new content.
///
/// # Errors
///
/// Returns the underlying I/O error from resolve, create, write, sync, or
/// rename.
pub fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let target = resolve_target(path)?;
    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());
    let temp_path = temp_sibling(&target);

    let result = write_and_sync(&temp_path, contents, permissions)
        .and_then(|()| fs::rename(&temp_path, &target));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// The real file behind `path`, or `path` itself when nothing exists there yet.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

fn write_and_sync(
    path: &Path,
    contents: &[u8],
    permissions: Option<fs::Permissions>,
) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    if let Some(permissions) = permissions {
        file.set_permissions(permissions)?;
    }
    file.write_all(contents)?;
    file.sync_all()
}

/// `dir/.name.<uuid>.tmp` next to the target, so the rename stays on one
/// file system.
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
}
