//! Directory reading and ordering.
//!
//! Listings are always produced whole: read every entry, classify it
//! without following symlinks, then sort directories first and names
//! lexicographically within each group.

use std::cmp::Ordering;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use super::entry::{DirEntry, EntryKind};
use super::error::BrowseError;

/// Listing knobs taken from `[browser]` config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub show_hidden: bool,
    pub parent_link: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            show_hidden: true,
            parent_link: false,
        }
    }
}

pub fn read_entries(path: &Path, options: &ListOptions) -> Result<Vec<DirEntry>, BrowseError> {
    let reader = fs::read_dir(path).map_err(|err| BrowseError::read_dir(path, err))?;
    let mut entries = Vec::new();
    for item in reader {
        let item = item.map_err(|err| BrowseError::read_dir(path, err))?;
        let file_name = item.file_name();
        if !options.show_hidden && file_name.as_bytes().starts_with(b".") {
            continue;
        }
        let file_type = match item.file_type() {
            Ok(file_type) => file_type,
            Err(err) => match fs::symlink_metadata(item.path()) {
                Ok(meta) => meta.file_type(),
                Err(_) => {
                    tracing::debug!(entry = %item.path().display(), error = %err, "skipping unstatable entry");
                    continue;
                }
            },
        };
        entries.push(DirEntry::from_file_name(
            file_name,
            EntryKind::from_file_type(file_type),
        ));
    }
    if options.parent_link && path.parent().is_some() {
        entries.push(DirEntry::parent_link());
    }
    sort_entries(&mut entries);
    Ok(entries)
}

/// Parent link first, then directories, then everything else.
pub fn sort_entries(entries: &mut [DirEntry]) {
    entries.sort_by(compare_entries);
}

fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.is_parent_link()
        .cmp(&a.is_parent_link())
        .then_with(|| b.kind().is_directory().cmp(&a.kind().is_directory()))
        .then_with(|| a.file_name().cmp(b.file_name()))
}
