use std::io;
use std::path::{Path, PathBuf};

use super::{EntryKind, Mode, PathEntry};
use crate::output::{CollisionReason, FailureReason, ItemOutcome, Outcome};
use crate::sanitize::{is_valid_name, sanitize};

/// A pending same-directory rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOperation {
    pub source: PathBuf,
    pub target: PathBuf,
    pub kind: EntryKind,
    pub from: String,
    pub to: String,
}

impl RenameOperation {
    /// Plan the rename for `entry`, or `None` when its name is already sanitized.
    pub fn plan(entry: &PathEntry) -> Option<Self> {
        let from = entry.name();
        let to = sanitize(&from);
        if to == from {
            return None;
        }

        Some(Self {
            source: entry.path.clone(),
            target: entry.path.with_file_name(&to),
            kind: entry.kind,
            from,
            to,
        })
    }

    fn outcome(&self, outcome: Outcome) -> ItemOutcome {
        ItemOutcome {
            path: self.source.clone(),
            kind: self.kind,
            from: self.from.clone(),
            to: self.to.clone(),
            outcome,
        }
    }

    /// Collision check; `None` means the target is free.
    fn collision(&self) -> Option<CollisionReason> {
        if !is_valid_name(&self.to) {
            return Some(CollisionReason::InvalidName);
        }
        match std::fs::symlink_metadata(&self.target) {
            Ok(_) if is_same_entry(&self.source, &self.target) => None,
            Ok(_) => Some(CollisionReason::Occupied),
            Err(_) => None,
        }
    }

    fn apply(&self) -> Outcome {
        match std::fs::rename(&self.source, &self.target) {
            Ok(()) => Outcome::Applied,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Outcome::Failed {
                reason: FailureReason::PermissionDenied,
            },
            Err(e) => Outcome::Failed {
                reason: FailureReason::Unexpected(e.to_string()),
            },
        }
    }
}

/// Process one snapshot entry: skip, simulate or apply its rename.
pub fn process_entry(entry: &PathEntry, mode: Mode) -> ItemOutcome {
    let Some(op) = RenameOperation::plan(entry) else {
        let name = entry.name();
        return ItemOutcome {
            path: entry.path.clone(),
            kind: entry.kind,
            from: name.clone(),
            to: name,
            outcome: Outcome::SkippedNoChange,
        };
    };

    if let Some(reason) = op.collision() {
        return op.outcome(Outcome::SkippedCollision { reason });
    }

    match mode {
        Mode::Simulate => op.outcome(Outcome::Simulated),
        Mode::Apply => {
            let outcome = op.apply();
            op.outcome(outcome)
        }
    }
}

/// Whether two paths name the same directory entry, as happens for
/// case-only renames on case-insensitive filesystems.
///
/// A second hard link shares the inode but is a distinct entry, so files
/// only count as the same entry when they have a single link.
#[cfg(unix)]
fn is_same_entry(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (std::fs::symlink_metadata(a), std::fs::symlink_metadata(b)) {
        (Ok(a), Ok(b)) => {
            a.dev() == b.dev() && a.ino() == b.ino() && (a.is_dir() || a.nlink() == 1)
        }
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_entry(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
