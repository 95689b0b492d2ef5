use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use file_sanitizer::output::{CollisionReason, FailureReason};
use file_sanitizer::tree::{self, Mode, TreeOptions};
use file_sanitizer::{Error, ItemOutcome, Outcome, Reporter, RunSummary};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct TreeArgs {
    /// Target directory path to sanitize
    pub path: PathBuf,

    /// Apply changes (disable the default dry-run)
    #[arg(short, long)]
    pub apply: bool,

    /// Directory name to skip entirely, e.g. .git (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum TreeOutput {
    #[serde(rename = "tree", rename_all = "camelCase")]
    Tree {
        root: String,
        dry_run: bool,
        items: Vec<ItemOutcome>,
        summary: RunSummary,
    },
}

pub fn run(args: TreeArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<TreeOutput> {
    for name in &args.exclude {
        validate_exclude(name)?;
    }

    let mode = Mode::from_apply_flag(args.apply);
    let options = TreeOptions::new(mode).with_exclude(args.exclude);

    file_sanitizer::log_status!("tree", "Scanning: {}", args.path.display());
    print_banner(mode);

    let mut reporter = (TerminalReporter, RunSummary::new());
    let items = tree::rename_tree(&args.path, &options, &mut reporter)?;
    let (_, summary) = reporter;

    let exit_code = if summary.has_failures() { 1 } else { 0 };

    Ok((
        TreeOutput::Tree {
            root: args.path.display().to_string(),
            dry_run: mode.is_dry_run(),
            items,
            summary,
        },
        exit_code,
    ))
}

fn validate_exclude(name: &str) -> file_sanitizer::Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation_invalid_argument(
            "exclude",
            "Excluded directory name cannot be empty",
            None,
        ));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::validation_invalid_argument(
            "exclude",
            "Excluded directory must be a bare name, not a path",
            Some(name.to_string()),
        ));
    }

    Ok(())
}

fn print_banner(mode: Mode) {
    match mode {
        Mode::Simulate => {
            crate::tty::status("\n--- DRY RUN MODE ---");
            crate::tty::status("No files will be changed. Use --apply to execute.\n");
        }
        Mode::Apply => crate::tty::status("\n!!! LIVE MODE !!!"),
    }
}

/// Prints one status line per outcome to stderr.
struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn record(&mut self, item: &ItemOutcome) {
        crate::tty::status(&format_outcome(item));
    }
}

fn format_outcome(item: &ItemOutcome) -> String {
    let kind = item.kind.as_str();
    match &item.outcome {
        Outcome::SkippedNoChange => format!("[UNCHANGED] {}: {}", kind, item.from),
        Outcome::SkippedCollision {
            reason: CollisionReason::Occupied,
        } => format!(
            "[COLLISION] {}: {} already exists. Skipping {}",
            kind,
            item.path.with_file_name(&item.to).display(),
            item.from
        ),
        Outcome::SkippedCollision {
            reason: CollisionReason::InvalidName,
        } => format!(
            "[COLLISION] {}: {} has no usable ASCII name. Skipping",
            kind, item.from
        ),
        Outcome::Simulated => format!("[DRY RUN] {}: {} -> {}", kind, item.from, item.to),
        Outcome::Applied => format!("[SUCCESS] {}: {} -> {}", kind, item.from, item.to),
        Outcome::Failed {
            reason: FailureReason::PermissionDenied,
        } => format!("[ERROR] {}: Permission denied renaming {}", kind, item.from),
        Outcome::Failed { reason } => {
            format!("[ERROR] {}: Failed renaming {}: {}", kind, item.from, reason)
        }
    }
}
