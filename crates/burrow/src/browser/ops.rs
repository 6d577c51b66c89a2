//! Filesystem mutations issued from the browser and command mode.

use std::fs::{self, OpenOptions};
use std::path::{Component, Path, PathBuf};

use super::entry::EntryKind;
use super::error::BrowseError;

/// Create a directory named `name` inside `dir`.
pub fn create_directory(dir: &Path, name: &str) -> Result<PathBuf, BrowseError> {
    let target = resolve_name(dir, name)?;
    fs::create_dir(&target).map_err(|err| BrowseError::create(&target, err))?;
    Ok(target)
}

/// Create an empty file named `name` inside `dir`. Existing files are an error.
pub fn create_file(dir: &Path, name: &str) -> Result<PathBuf, BrowseError> {
    let target = resolve_name(dir, name)?;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
        .map_err(|err| BrowseError::create(&target, err))?;
    Ok(target)
}

/// Remove a file, or a directory tree when `kind` is a directory.
///
/// Symlinks are unlinked, never followed.
pub fn remove_entry(path: &Path, kind: EntryKind) -> Result<(), BrowseError> {
    let result = match kind {
        EntryKind::Directory => fs::remove_dir_all(path),
        EntryKind::RegularFile
        | EntryKind::Symlink
        | EntryKind::NamedPipe
        | EntryKind::Socket
        | EntryKind::Device => fs::remove_file(path),
    };
    result.map_err(|source| match source.kind() {
        std::io::ErrorKind::PermissionDenied => BrowseError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => BrowseError::Remove {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn resolve_name(dir: &Path, name: &str) -> Result<PathBuf, BrowseError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BrowseError::InvalidName(name.to_string()));
    }
    // Exactly one plain component, so the entry lands in `dir` itself.
    let mut parts = Path::new(trimmed).components();
    match (parts.next(), parts.next()) {
        (Some(Component::Normal(part)), None) => Ok(dir.join(part)),
        _ => Err(BrowseError::InvalidName(name.to_string())),
    }
}
