use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Filesystem failure surfaced to the status area.
///
/// Every variant names the path involved so the message can be shown
/// as-is without further context.
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("cannot read {}: {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },
    #[error("cannot stat {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },
    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },
    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },
    #[error("cannot create {}: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error("cannot remove {}: {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    #[error("refusing to remove the parent link")]
    ParentLink,
}

impl BrowseError {
    /// Classify a create failure by its io kind.
    pub(crate) fn create(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::AlreadyExists => BrowseError::AlreadyExists { path },
            io::ErrorKind::PermissionDenied => BrowseError::PermissionDenied { path },
            _ => BrowseError::Create { path, source },
        }
    }

    pub(crate) fn read_dir(path: &Path, source: io::Error) -> Self {
        BrowseError::ReadDir {
            path: path.to_path_buf(),
            source,
        }
    }
}
