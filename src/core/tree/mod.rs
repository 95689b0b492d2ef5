//! Tree renamer: sanitize every name below a root directory, bottom-up.
//!
//! 1. Validates the root (the only run-fatal failure)
//! 2. Snapshots all descendants and orders them deepest-first
//! 3. Plans, then simulates or applies, one rename per entry
//! 4. Hands each outcome to the caller's reporter as it is produced

mod entry;
mod rename;

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::output::{ItemOutcome, Reporter};

pub use entry::{snapshot, validate_root, EntryKind, PathEntry};
pub use rename::{process_entry, RenameOperation};

/// Whether renames touch the filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Compute and report only.
    #[default]
    Simulate,
    /// Perform renames on disk.
    Apply,
}

impl Mode {
    pub fn from_apply_flag(apply: bool) -> Self {
        if apply {
            Mode::Apply
        } else {
            Mode::Simulate
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == Mode::Simulate
    }
}

/// Options for a single run.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub mode: Mode,
    /// Directory names that are neither descended into nor renamed.
    pub exclude: Vec<String>,
}

impl TreeOptions {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            exclude: Vec::new(),
        }
    }

    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Sanitize every entry below `root`.
///
/// Returns one outcome per entry in processing order. Only root validation
/// and snapshot I/O errors are returned as `Err`; per-entry failures are
/// reported as [`crate::output::Outcome::Failed`] and the run continues.
pub fn rename_tree(
    root: &Path,
    options: &TreeOptions,
    reporter: &mut dyn Reporter,
) -> Result<Vec<ItemOutcome>> {
    let entries = snapshot(root, options)?;
    crate::log_status!("tree", "Found {} items to sanitize", entries.len());

    let mut outcomes = Vec::with_capacity(entries.len());
    for entry in &entries {
        let item = process_entry(entry, options.mode);
        reporter.record(&item);
        outcomes.push(item);
    }

    Ok(outcomes)
}
