//! Directory navigation state.
//!
//! `Navigator` owns the current `DirectoryView` and every transition
//! that replaces or mutates it:
//! - selection moves (clamped, no wrap)
//! - entering a directory or handing back a file to open
//! - going to the parent
//! - deleting the selected entry
//! - refreshing from disk
//!
//! There is no filesystem watch. The view is re-read whole after every
//! change the app knows about, so it is only as fresh as the last refresh.

mod details;
mod entry;
mod error;
mod listing;
mod ops;

#[cfg(test)]
mod tests;

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

pub use details::{describe, DetailRow};
pub use entry::{DirEntry, EntryKind};
pub use error::BrowseError;
pub use listing::{read_entries, ListOptions};
pub use ops::{create_directory, create_file, remove_entry};

/// A listed directory and the highlighted row.
#[derive(Debug, Clone)]
pub struct DirectoryView {
    path: PathBuf,
    entries: Vec<DirEntry>,
    selected: usize,
}

impl DirectoryView {
    pub fn load(path: &Path, options: &ListOptions) -> Result<Self, BrowseError> {
        let entries = read_entries(path, options)?;
        Ok(Self {
            path: path.to_path_buf(),
            entries,
            selected: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&DirEntry> {
        self.entries.get(self.selected)
    }

    /// Absolute path of the selected entry (the parent dir for `..`).
    pub fn selected_path(&self) -> Option<PathBuf> {
        let entry = self.selected()?;
        if entry.is_parent_link() {
            return self.path.parent().map(Path::to_path_buf);
        }
        Some(self.path.join(entry.file_name()))
    }

    fn select_file_name(&mut self, file_name: &OsStr) -> bool {
        match self.entries.iter().position(|entry| entry.file_name() == file_name) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    fn clamp_selection(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.entries.len() {
            self.selected = self.entries.len() - 1;
        }
    }
}

/// What `enter()` decided to do with the selected entry.
#[derive(Debug)]
pub enum EnterOutcome {
    /// The view now shows the entered directory.
    Entered,
    /// A regular file (or a link to one) should be opened in the editor.
    OpenFile(PathBuf),
    /// Nothing selected.
    Nothing,
    /// The target cannot be opened (pipe, socket, device, dangling link).
    NotOpenable { path: PathBuf, kind: Option<EntryKind> },
    /// The directory could not be listed; the view is unchanged.
    Unreadable(BrowseError),
}

pub struct Navigator {
    view: DirectoryView,
    options: ListOptions,
}

impl Navigator {
    /// List `path` for the first time. Failure here is fatal for the app.
    pub fn open(path: &Path, options: ListOptions) -> Result<Self, BrowseError> {
        let view = DirectoryView::load(path, &options)?;
        tracing::info!(path = %path.display(), entries = view.entries.len(), "opened directory");
        Ok(Self { view, options })
    }

    pub fn view(&self) -> &DirectoryView {
        &self.view
    }

    pub fn current_dir(&self) -> &Path {
        self.view.path()
    }

    pub fn select_next(&mut self) {
        if self.view.selected + 1 < self.view.entries.len() {
            self.view.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.view.selected > 0 {
            self.view.selected -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.view.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.view.selected = self.view.entries.len().saturating_sub(1);
    }

    pub fn enter(&mut self) -> EnterOutcome {
        let Some(entry) = self.view.selected().cloned() else {
            return EnterOutcome::Nothing;
        };
        if entry.is_parent_link() {
            return match self.go_up() {
                Ok(_) => EnterOutcome::Entered,
                Err(err) => EnterOutcome::Unreadable(err),
            };
        }
        let path = self.view.path.join(entry.file_name());
        let target_kind = match entry.kind() {
            EntryKind::Symlink => fs::metadata(&path)
                .ok()
                .map(|meta| EntryKind::from_file_type(meta.file_type())),
            kind => Some(kind),
        };
        match target_kind {
            Some(EntryKind::Directory) => match self.change_dir(&path) {
                Ok(()) => EnterOutcome::Entered,
                Err(err) => EnterOutcome::Unreadable(err),
            },
            Some(EntryKind::RegularFile) => EnterOutcome::OpenFile(path),
            kind => EnterOutcome::NotOpenable { path, kind },
        }
    }

    /// Move to the parent directory. Returns `false` at the root.
    pub fn go_up(&mut self) -> Result<bool, BrowseError> {
        let Some(parent) = self.view.path.parent().map(Path::to_path_buf) else {
            return Ok(false);
        };
        let left = self.view.path.file_name().map(OsStr::to_os_string);
        self.change_dir(&parent)?;
        if let Some(name) = left {
            self.view.select_file_name(&name);
        }
        Ok(true)
    }

    /// Replace the view with a listing of `path`; unchanged on failure.
    pub fn change_dir(&mut self, path: &Path) -> Result<(), BrowseError> {
        let view = DirectoryView::load(path, &self.options)?;
        tracing::debug!(path = %path.display(), "changed directory");
        self.view = view;
        Ok(())
    }

    /// Re-read the current directory, keeping the selection on the same
    /// name when it survived.
    pub fn refresh(&mut self) -> Result<(), BrowseError> {
        let previous: Option<OsString> = self
            .view
            .selected()
            .map(|entry| entry.file_name().to_os_string());
        let previous_index = self.view.selected;
        let mut view = DirectoryView::load(&self.view.path, &self.options)?;
        let kept = previous
            .as_deref()
            .map(|name| view.select_file_name(name))
            .unwrap_or(false);
        if !kept {
            view.selected = previous_index;
            view.clamp_selection();
        }
        self.view = view;
        Ok(())
    }

    /// Remove the selected entry and re-list. Returns the removed name.
    pub fn delete_selected(&mut self) -> Result<String, BrowseError> {
        let Some(entry) = self.view.selected().cloned() else {
            return Err(BrowseError::InvalidName(String::new()));
        };
        if entry.is_parent_link() {
            return Err(BrowseError::ParentLink);
        }
        let path = self.view.path.join(entry.file_name());
        remove_entry(&path, entry.kind())?;
        tracing::info!(path = %path.display(), kind = entry.kind().label(), "removed entry");
        self.refresh()?;
        Ok(entry.name().to_string())
    }

    /// Move the selection to `name` if it is listed.
    pub fn select_name(&mut self, name: &str) -> bool {
        self.view.select_file_name(OsStr::new(name))
    }

    /// Like `select_name`, for an on-disk name that may not be UTF-8.
    pub fn select_file_name(&mut self, file_name: &OsStr) -> bool {
        self.view.select_file_name(file_name)
    }
}
