use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use file_sanitizer::tree::{self, snapshot, Mode, TreeOptions};
use file_sanitizer::{CollisionReason, ItemOutcome, NullReporter, Outcome, RunSummary};
use tempfile::TempDir;
use walkdir::WalkDir;

fn listing(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap().path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "content").unwrap();
}

fn run(root: &Path, mode: Mode) -> Vec<ItemOutcome> {
    tree::rename_tree(root, &TreeOptions::new(mode), &mut NullReporter).unwrap()
}

#[test]
fn simulate_reports_child_then_parent_and_changes_nothing() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("A/b.TXT"));
    let before = listing(dir.path());

    let items = run(dir.path(), Mode::Simulate);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].from, "b.TXT");
    assert_eq!(items[0].to, "b.txt");
    assert_eq!(items[0].outcome, Outcome::Simulated);
    assert_eq!(items[1].from, "A");
    assert_eq!(items[1].to, "a");
    assert_eq!(items[1].outcome, Outcome::Simulated);

    assert_eq!(listing(dir.path()), before);
}

#[test]
fn apply_renames_whole_tree_bottom_up() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("Top Folder/Sub Folder/Deep File.TXT"));
    touch(&dir.path().join("Top Folder/Résumé.md"));

    let items = run(dir.path(), Mode::Apply);

    assert!(items.iter().all(|i| i.outcome == Outcome::Applied));
    let expected: BTreeSet<PathBuf> = [
        "top-folder",
        "top-folder/sub-folder",
        "top-folder/sub-folder/deep-file.txt",
        "top-folder/resume.md",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(listing(dir.path()), expected);
}

#[test]
fn apply_skips_collision_and_keeps_both_files() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("File.txt"));
    touch(&dir.path().join("file.txt"));

    // Case-insensitive filesystems cannot hold both names
    if listing(dir.path()).len() != 2 {
        return;
    }

    let items = run(dir.path(), Mode::Apply);

    let upper = items.iter().find(|i| i.from == "File.txt").unwrap();
    assert_eq!(
        upper.outcome,
        Outcome::SkippedCollision {
            reason: CollisionReason::Occupied
        }
    );
    let lower = items.iter().find(|i| i.from == "file.txt").unwrap();
    assert_eq!(lower.outcome, Outcome::SkippedNoChange);

    assert!(dir.path().join("File.txt").exists());
    assert!(dir.path().join("file.txt").exists());
}

#[test]
fn apply_on_clean_name_is_no_change() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("already-clean.txt"));

    let items = run(dir.path(), Mode::Apply);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].outcome, Outcome::SkippedNoChange);
    assert_eq!(items[0].to, "already-clean.txt");
    assert!(dir.path().join("already-clean.txt").exists());
}

#[test]
fn descendants_are_ordered_before_ancestors() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("A/B/C/d.txt"));
    touch(&dir.path().join("A/e.txt"));
    touch(&dir.path().join("F/G/h.txt"));
    touch(&dir.path().join("i.txt"));
    fs::create_dir_all(dir.path().join("Empty/Nested")).unwrap();

    let entries = snapshot(dir.path(), &TreeOptions::default()).unwrap();

    for (pi, parent) in entries.iter().enumerate() {
        for (di, descendant) in entries.iter().enumerate() {
            if descendant.path != parent.path && descendant.path.starts_with(&parent.path) {
                assert!(
                    di < pi,
                    "{} must come before {}",
                    descendant.path.display(),
                    parent.path.display()
                );
            }
        }
    }
}

#[test]
fn outcomes_reach_reporter_in_processing_order() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("One/Two.txt"));
    touch(&dir.path().join("three.txt"));

    let mut seen: Vec<ItemOutcome> = Vec::new();
    let items =
        tree::rename_tree(dir.path(), &TreeOptions::new(Mode::Simulate), &mut seen).unwrap();

    assert_eq!(seen, items);
    let summary = RunSummary::from_items(&items);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.simulated, 2);
    assert_eq!(summary.unchanged, 1);
}

#[test]
fn missing_root_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let err = tree::rename_tree(
        &dir.path().join("nope"),
        &TreeOptions::default(),
        &mut NullReporter,
    )
    .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(err.code.as_str(), "target.not_found");
}

#[test]
fn file_root_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("file.txt");
    touch(&file);

    let err = tree::rename_tree(&file, &TreeOptions::default(), &mut NullReporter).unwrap_err();
    assert_eq!(err.code.as_str(), "target.not_directory");
}

#[test]
fn excluded_directory_is_left_alone() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join(".git/HEAD"));
    touch(&dir.path().join("Notes.MD"));

    let options = TreeOptions::new(Mode::Apply).with_exclude([".git"]);
    let items = tree::rename_tree(dir.path(), &options, &mut NullReporter).unwrap();

    assert_eq!(items.len(), 1);
    assert!(dir.path().join(".git/HEAD").exists());
    assert!(dir.path().join("notes.md").exists());
}

#[test]
fn failure_does_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("Vanishing File.txt"));
    touch(&dir.path().join("Staying File.txt"));

    let entries = snapshot(dir.path(), &TreeOptions::default()).unwrap();
    fs::remove_file(dir.path().join("Vanishing File.txt")).unwrap();

    let items: Vec<ItemOutcome> = entries
        .iter()
        .map(|e| tree::process_entry(e, Mode::Apply))
        .collect();

    assert!(items.iter().any(|i| i.outcome.is_failure()));
    assert!(items.iter().any(|i| i.outcome == Outcome::Applied));
    assert!(dir.path().join("staying-file.txt").exists());
}

#[cfg(unix)]
#[test]
fn hard_linked_target_is_a_collision() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("My File.txt"));
    fs::hard_link(dir.path().join("My File.txt"), dir.path().join("my-file.txt")).unwrap();

    let items = run(dir.path(), Mode::Apply);

    let upper = items.iter().find(|i| i.from == "My File.txt").unwrap();
    assert_eq!(
        upper.outcome,
        Outcome::SkippedCollision {
            reason: CollisionReason::Occupied
        }
    );
    assert!(dir.path().join("My File.txt").exists());
    assert!(dir.path().join("my-file.txt").exists());
}

#[cfg(unix)]
#[test]
fn permission_denied_is_reported_and_run_continues() {
    use file_sanitizer::FailureReason;
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let locked = dir.path().join("locked");
    touch(&locked.join("Bad Name.txt"));
    touch(&dir.path().join("Good Name.txt"));
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users ignore permission bits
    if fs::write(locked.join("write-check"), "x").is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let items = run(dir.path(), Mode::Apply);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let bad = items.iter().find(|i| i.from == "Bad Name.txt").unwrap();
    assert_eq!(
        bad.outcome,
        Outcome::Failed {
            reason: FailureReason::PermissionDenied
        }
    );
    let good = items.iter().find(|i| i.from == "Good Name.txt").unwrap();
    assert_eq!(good.outcome, Outcome::Applied);

    assert!(locked.join("Bad Name.txt").exists());
    assert!(dir.path().join("good-name.txt").exists());
    assert!(RunSummary::from_items(&items).has_failures());
}
