use std::ffi::{OsStr, OsString};
use std::fs::FileType;
use std::os::unix::fs::FileTypeExt;

/// Filesystem object type, derived from a non-following stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    RegularFile,
    Symlink,
    NamedPipe,
    Socket,
    Device,
}

impl EntryKind {
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_fifo() {
            EntryKind::NamedPipe
        } else if file_type.is_socket() {
            EntryKind::Socket
        } else if file_type.is_block_device() || file_type.is_char_device() {
            EntryKind::Device
        } else {
            EntryKind::RegularFile
        }
    }

    pub fn is_directory(self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Directory => "directory",
            EntryKind::RegularFile => "file",
            EntryKind::Symlink => "symlink",
            EntryKind::NamedPipe => "named pipe",
            EntryKind::Socket => "socket",
            EntryKind::Device => "device",
        }
    }
}

/// One row of a directory listing. Immutable once built.
///
/// `file_name` is the on-disk name and the only one used to build paths.
/// `name` is its lossy UTF-8 form for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    file_name: OsString,
    name: String,
    kind: EntryKind,
    is_parent_link: bool,
}

pub const PARENT_LINK_NAME: &str = "..";

impl DirEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        let name = name.into();
        Self {
            file_name: OsString::from(&name),
            name,
            kind,
            is_parent_link: false,
        }
    }

    pub fn from_file_name(file_name: OsString, kind: EntryKind) -> Self {
        Self {
            name: file_name.to_string_lossy().into_owned(),
            file_name,
            kind,
            is_parent_link: false,
        }
    }

    pub fn parent_link() -> Self {
        Self {
            file_name: OsString::from(PARENT_LINK_NAME),
            name: PARENT_LINK_NAME.to_string(),
            kind: EntryKind::Directory,
            is_parent_link: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_name(&self) -> &OsStr {
        &self.file_name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_parent_link(&self) -> bool {
        self.is_parent_link
    }
}
