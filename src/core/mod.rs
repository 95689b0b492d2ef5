// Public modules
pub mod error;
pub mod output;
pub mod sanitize;
pub mod tree;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{
    CollisionReason, FailureReason, ItemOutcome, NullReporter, Outcome, Reporter, RunSummary,
};
pub use sanitize::sanitize;
pub use tree::{rename_tree, EntryKind, Mode, PathEntry, RenameOperation, TreeOptions};
