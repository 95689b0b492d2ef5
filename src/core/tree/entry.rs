use serde::Serialize;
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::TreeOptions;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "FILE",
            EntryKind::Folder => "FOLDER",
        }
    }
}

/// A filesystem entry captured in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Path component count. Only meaningful relative to other entries of the same snapshot.
    pub depth: usize,
}

impl PathEntry {
    pub fn new(path: PathBuf, kind: EntryKind) -> Self {
        let depth = path.components().count();
        Self { path, kind, depth }
    }

    /// Current file name, lossily decoded.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Check that `root` exists and is a directory, returning its absolute form.
pub fn validate_root(root: &Path) -> Result<PathBuf> {
    let display = root.display().to_string();

    let metadata = std::fs::metadata(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::target_not_found(display.clone()),
        _ => Error::internal_io(e.to_string(), Some(format!("stat {}", display))),
    })?;

    if !metadata.is_dir() {
        return Err(Error::target_not_directory(display));
    }

    std::fs::canonicalize(root)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("resolve {}", display))))
}

/// Enumerate every descendant of `root`, deepest entries first.
///
/// The root itself is not included. Symlinks are not followed and are
/// reported as files. Entries that cannot be read are skipped.
pub fn snapshot(root: &Path, options: &TreeOptions) -> Result<Vec<PathEntry>> {
    let root = validate_root(root)?;

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_excluded(e, &options.exclude));

    let mut entries = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                crate::log_status!("tree", "Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let kind = if entry.file_type().is_dir() {
            EntryKind::Folder
        } else {
            EntryKind::File
        };
        entries.push(PathEntry::new(entry.into_path(), kind));
    }

    order_deepest_first(&mut entries);
    Ok(entries)
}

/// Sort so every entry precedes its parent directory.
///
/// Equal depths cannot be ancestors of each other; ties are broken by path
/// for stable output.
pub(crate) fn order_deepest_first(entries: &mut [PathEntry]) {
    entries.sort_by(|a, b| {
        Reverse(a.depth)
            .cmp(&Reverse(b.depth))
            .then_with(|| a.path.cmp(&b.path))
    });
}

fn is_excluded(entry: &walkdir::DirEntry, exclude: &[String]) -> bool {
    if exclude.is_empty() || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    exclude.iter().any(|x| x.as_str() == name)
}
