//! Metadata rows for the details pane.

use std::fs;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use super::entry::{DirEntry, EntryKind};
use super::error::BrowseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

impl DetailRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Stat `path` (without following links) and describe it.
pub fn describe(path: &Path, entry: &DirEntry) -> Result<Vec<DetailRow>, BrowseError> {
    let meta = fs::symlink_metadata(path).map_err(|source| BrowseError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = vec![
        DetailRow::new("Name", entry.name()),
        DetailRow::new("Type", entry.kind().label()),
        DetailRow::new("Size", format_size(meta.len())),
        DetailRow::new(
            "Mode",
            format_mode(entry.kind(), meta.permissions().mode()),
        ),
        DetailRow::new("Owner", format!("{}:{}", meta.uid(), meta.gid())),
    ];
    if let Ok(modified) = meta.modified() {
        rows.push(DetailRow::new("Modified", format_time(modified)));
    }
    if entry.kind() == EntryKind::Symlink {
        let target = fs::read_link(path)
            .map(|target| target.display().to_string())
            .unwrap_or_else(|err| format!("<{err}>"));
        rows.push(DetailRow::new("Target", target));
    }
    Ok(rows)
}

pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "K", "M", "G", "T"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// `ls -l` style permission string.
pub fn format_mode(kind: EntryKind, mode: u32) -> String {
    let type_char = match kind {
        EntryKind::Directory => 'd',
        EntryKind::RegularFile => '-',
        EntryKind::Symlink => 'l',
        EntryKind::NamedPipe => 'p',
        EntryKind::Socket => 's',
        EntryKind::Device => 'c',
    };
    let mut out = String::with_capacity(10);
    out.push(type_char);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

fn format_time(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}
