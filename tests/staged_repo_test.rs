//! Integration tests for staged change inspection and committing.
//!
//! Exercises `StagedRepo` from `src/git/staged.rs` against temporary
//! git repositories.

mod common;

use commit_genius::error::GitError;
use commit_genius::generate::read_staged;
use commit_genius::git::{MAX_DIFF_LENGTH, StagedChanges, StagedRepo, is_repository};
use common::{TestRepo, temp_test_dir};

fn open(test_repo: &TestRepo) -> StagedRepo {
    StagedRepo::discover(test_repo.path()).expect("Failed to discover repo")
}

// =============================================================================
// REPOSITORY DETECTION
// =============================================================================

#[test]
fn test_plain_directory_is_not_a_repository() {
    let dir = temp_test_dir();
    assert!(!is_repository(dir.path()));
    assert!(matches!(
        StagedRepo::discover(dir.path()),
        Err(GitError::NotARepository(_))
    ));
}

#[test]
fn test_nested_directory_is_inside_repository() {
    let test_repo = TestRepo::new();
    test_repo.write("crates/core/src/lib.rs", "");
    assert!(is_repository(&test_repo.path().join("crates/core/src")));
}

// =============================================================================
// STAGED CHANGES
// =============================================================================

#[test]
fn test_nothing_staged_after_commit() {
    let test_repo = TestRepo::new();
    test_repo.stage("README.md", "# Project\n");
    test_repo.commit_index("Initial commit");

    let staged = open(&test_repo);
    assert!(!staged.has_staged_changes().unwrap());
    assert!(matches!(read_staged(&staged), Err(GitError::NoStagedChanges)));
}

#[test]
fn test_staged_files_are_sorted_and_include_nested_paths() {
    let test_repo = TestRepo::new();
    test_repo.stage("src/main.rs", "fn main() {}\n");
    test_repo.stage("Cargo.toml", "[package]\n");
    test_repo.stage("docs/guide.md", "# Guide\n");

    let files = open(&test_repo).staged_files().unwrap();
    assert_eq!(files, vec!["Cargo.toml", "docs/guide.md", "src/main.rs"]);
}

#[test]
fn test_deleted_file_is_listed_and_diffed() {
    let test_repo = TestRepo::new();
    test_repo.stage("old.txt", "legacy\n");
    test_repo.stage("keep.txt", "keep\n");
    test_repo.commit_index("Initial commit");

    test_repo.stage_removal("old.txt");

    let staged = open(&test_repo);
    assert_eq!(staged.staged_files().unwrap(), vec!["old.txt"]);
    let diff = staged.staged_diff().unwrap();
    assert!(diff.contains("-legacy"));
}

#[test]
fn test_only_staged_hunks_appear_in_diff() {
    let test_repo = TestRepo::new();
    test_repo.stage("app.rs", "fn a() {}\n");
    test_repo.commit_index("Initial commit");

    test_repo.stage("app.rs", "fn a() {}\nfn b() {}\n");
    test_repo.write("app.rs", "fn a() {}\nfn b() {}\nfn c() {}\n");

    let diff = open(&test_repo).staged_diff().unwrap();
    assert!(diff.contains("+fn b() {}"));
    assert!(!diff.contains("fn c()"));
}

#[test]
fn test_read_staged_snapshot() {
    let test_repo = TestRepo::new();
    test_repo.stage("tests/login_test.rs", "#[test]\nfn login() {}\n");

    let snapshot = read_staged(&open(&test_repo)).unwrap();
    assert_eq!(snapshot.files, vec!["tests/login_test.rs"]);
    assert!(snapshot.diff.contains("+++ b/tests/login_test.rs"));
}

#[test]
fn test_diff_never_exceeds_limit() {
    let test_repo = TestRepo::new();
    for i in 0..20 {
        test_repo.stage(&format!("data/file{}.txt", i), &"payload line\n".repeat(300));
    }

    let diff = open(&test_repo).staged_diff().unwrap();
    assert!(diff.len() <= MAX_DIFF_LENGTH);
    assert!(diff.ends_with('\n'));
}

// =============================================================================
// COMMITTING
// =============================================================================

#[test]
fn test_first_commit_on_unborn_branch() {
    let test_repo = TestRepo::new();
    test_repo.stage("lib.rs", "pub fn hello() {}\n");

    let id = open(&test_repo).commit("Add hello function").unwrap();

    assert_eq!(test_repo.commit_count(), 1);
    assert_eq!(test_repo.head_message(), "Add hello function");
    assert_eq!(
        test_repo.repo.head().unwrap().target().unwrap().to_string(),
        id
    );
}

#[test]
fn test_commit_builds_on_head() {
    let test_repo = TestRepo::new();
    test_repo.stage("lib.rs", "pub fn hello() {}\n");
    test_repo.commit_index("Initial commit");

    test_repo.stage("lib.rs", "pub fn hello() -> &'static str { \"hi\" }\n");
    open(&test_repo)
        .commit("feat(lib): Return greeting\n\nCallers can now print it.")
        .unwrap();

    assert_eq!(test_repo.commit_count(), 2);
    assert!(test_repo.head_message().starts_with("feat(lib): Return greeting"));
    assert!(!open(&test_repo).has_staged_changes().unwrap());
}

#[test]
fn test_blank_message_is_rejected_without_committing() {
    let test_repo = TestRepo::new();
    test_repo.stage("lib.rs", "\n");

    let result = open(&test_repo).commit("   ");

    assert!(matches!(result, Err(GitError::EmptyMessage)));
    assert_eq!(test_repo.commit_count(), 0);
}
