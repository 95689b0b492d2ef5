//! Per-item outcome types and the reporter sink.
//!
//! Every entry the tree renamer visits produces exactly one [`ItemOutcome`].
//! Outcomes are values, never errors: a failed rename is reported here and
//! the walk moves on.

use serde::Serialize;
use std::path::PathBuf;

use crate::tree::EntryKind;

// ============================================================================
// Outcomes
// ============================================================================

/// Result of processing one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Name is already sanitized; nothing to do.
    SkippedNoChange,
    /// Target name is unusable or already taken.
    SkippedCollision { reason: CollisionReason },
    /// Simulate mode: the rename would have been attempted.
    Simulated,
    /// Apply mode: the rename succeeded.
    Applied,
    /// Apply mode: the rename was attempted and failed.
    Failed { reason: FailureReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionReason {
    /// A different entry already exists at the target path.
    Occupied,
    /// Sanitized name is empty, `.` or `..`.
    InvalidName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FailureReason {
    PermissionDenied,
    Unexpected(String),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::SkippedNoChange => "skipped_no_change",
            Outcome::SkippedCollision { .. } => "skipped_collision",
            Outcome::Simulated => "simulated",
            Outcome::Applied => "applied",
            Outcome::Failed { .. } => "failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::PermissionDenied => write!(f, "permission denied"),
            FailureReason::Unexpected(message) => write!(f, "unexpected: {}", message),
        }
    }
}

/// Outcome for a single entry, with enough context to display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome {
    /// Path of the entry as captured in the snapshot.
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Current file name.
    pub from: String,
    /// Sanitized file name.
    pub to: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

// ============================================================================
// Reporting
// ============================================================================

/// Sink that receives each outcome as soon as it is produced.
pub trait Reporter {
    fn record(&mut self, item: &ItemOutcome);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn record(&mut self, item: &ItemOutcome) {
        (**self).record(item);
    }
}

impl Reporter for Vec<ItemOutcome> {
    fn record(&mut self, item: &ItemOutcome) {
        self.push(item.clone());
    }
}

/// Fan out to two reporters, in order.
impl<A: Reporter, B: Reporter> Reporter for (A, B) {
    fn record(&mut self, item: &ItemOutcome) {
        self.0.record(item);
        self.1.record(item);
    }
}

/// Reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn record(&mut self, _item: &ItemOutcome) {}
}

// ============================================================================
// Summary
// ============================================================================

/// Counts of outcomes by variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: usize,
    pub unchanged: usize,
    pub collisions: usize,
    pub simulated: usize,
    pub applied: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: &[ItemOutcome]) -> Self {
        let mut summary = Self::new();
        for item in items {
            summary.record(item);
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl Reporter for RunSummary {
    fn record(&mut self, item: &ItemOutcome) {
        self.total += 1;
        match item.outcome {
            Outcome::SkippedNoChange => self.unchanged += 1,
            Outcome::SkippedCollision { .. } => self.collisions += 1,
            Outcome::Simulated => self.simulated += 1,
            Outcome::Applied => self.applied += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(outcome: Outcome) -> ItemOutcome {
        ItemOutcome {
            path: PathBuf::from("/tmp/root/My File.txt"),
            kind: EntryKind::File,
            from: "My File.txt".to_string(),
            to: "my-file.txt".to_string(),
            outcome,
        }
    }

    #[test]
    fn summary_counts_each_variant() {
        let items = vec![
            item(Outcome::SkippedNoChange),
            item(Outcome::SkippedCollision {
                reason: CollisionReason::Occupied,
            }),
            item(Outcome::Simulated),
            item(Outcome::Applied),
            item(Outcome::Applied),
            item(Outcome::Failed {
                reason: FailureReason::PermissionDenied,
            }),
        ];

        let summary = RunSummary::from_items(&items);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.collisions, 1);
        assert_eq!(summary.simulated, 1);
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.failed, 1);
        assert!(summary.has_failures());
    }

    #[test]
    fn tuple_reporter_fans_out() {
        let mut sink = (Vec::new(), RunSummary::new());
        sink.record(&item(Outcome::Simulated));
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.1.simulated, 1);
    }

    #[test]
    fn item_serializes_flat_status() {
        let json = serde_json::to_value(item(Outcome::Failed {
            reason: FailureReason::Unexpected("gone".to_string()),
        }))
        .unwrap();

        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "file");
        assert_eq!(json["reason"]["kind"], "unexpected");
        assert_eq!(json["reason"]["message"], "gone");
        assert_eq!(json["to"], "my-file.txt");
    }

    #[test]
    fn collision_serializes_reason() {
        let json = serde_json::to_value(item(Outcome::SkippedCollision {
            reason: CollisionReason::InvalidName,
        }))
        .unwrap();

        assert_eq!(json["status"], "skipped_collision");
        assert_eq!(json["reason"], "invalid_name");
    }

    #[test]
    fn labels_are_distinct() {
        let labels = [
            Outcome::SkippedNoChange.label(),
            Outcome::SkippedCollision {
                reason: CollisionReason::Occupied,
            }
            .label(),
            Outcome::Simulated.label(),
            Outcome::Applied.label(),
            Outcome::Failed {
                reason: FailureReason::PermissionDenied,
            }
            .label(),
        ];
        let mut unique = labels.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), labels.len());
    }
}
