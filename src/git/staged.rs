//! Staged change inspection and committing using git2.

use std::path::Path;

use git2::{Diff, DiffFormat, ErrorCode, Repository, Tree};
use tracing::{debug, warn};

use crate::error::GitError;

/// Maximum bytes of unified diff text handed to callers.
pub const MAX_DIFF_LENGTH: usize = 30_000;

/// Read access to the index and the ability to commit it.
///
/// This abstraction allows mocking the repository in tests.
#[cfg_attr(test, mockall::automock)]
pub trait StagedChanges {
    /// Whether the index differs from HEAD.
    fn has_staged_changes(&self) -> Result<bool, GitError>;

    /// Paths of staged files, sorted.
    fn staged_files(&self) -> Result<Vec<String>, GitError>;

    /// Unified diff of the index against HEAD.
    fn staged_diff(&self) -> Result<String, GitError>;

    /// Commit the index on HEAD. Returns the new commit id.
    fn commit(&self, message: &str) -> Result<String, GitError>;
}

/// Whether `path` is inside a git repository.
pub fn is_repository(path: &Path) -> bool {
    Repository::discover(path).is_ok()
}

/// A repository whose index is inspected and committed.
pub struct StagedRepo {
    repo: Repository,
}

impl StagedRepo {
    /// Open the repository containing `path`.
    pub fn discover(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(GitError::NotARepository)?;
        Ok(Self { repo })
    }

    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    fn index_diff(&self) -> Result<Diff<'_>, GitError> {
        let head_tree = resolve_head_tree(&self.repo)?;
        self.repo
            .diff_tree_to_index(head_tree.as_ref(), None, None)
            .map_err(GitError::DiffFailed)
    }
}

impl StagedChanges for StagedRepo {
    fn has_staged_changes(&self) -> Result<bool, GitError> {
        Ok(self.index_diff()?.deltas().len() > 0)
    }

    fn staged_files(&self) -> Result<Vec<String>, GitError> {
        let diff = self.index_diff()?;

        let mut files: Vec<String> = diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().to_string())
            })
            .collect();

        files.sort();
        files.dedup();
        Ok(files)
    }

    fn staged_diff(&self) -> Result<String, GitError> {
        let diff = self.index_diff()?;
        let (text, truncated) = render_patch(&diff)?;

        if truncated {
            warn!(
                "Staged diff exceeds {} bytes, truncating before sending to the model",
                MAX_DIFF_LENGTH
            );
        }

        Ok(text)
    }

    fn commit(&self, message: &str) -> Result<String, GitError> {
        if message.trim().is_empty() {
            return Err(GitError::EmptyMessage);
        }

        let mut index = self.repo.index().map_err(GitError::CommitFailed)?;
        let tree_id = index.write_tree().map_err(GitError::CommitFailed)?;
        let tree = self.repo.find_tree(tree_id).map_err(GitError::CommitFailed)?;

        let sig = self.repo.signature().map_err(GitError::ConfigError)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit().map_err(GitError::CommitFailed)?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(GitError::CommitFailed(e)),
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .map_err(GitError::CommitFailed)?;

        debug!("Created commit {}", oid);
        Ok(oid.to_string())
    }
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// so the whole index counts as staged.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Render a diff as unified patch text, stopping at [`MAX_DIFF_LENGTH`].
///
/// Returns the text and whether it was truncated.
fn render_patch(diff: &Diff<'_>) -> Result<(String, bool), GitError> {
    let mut text = String::new();
    let mut truncated = false;

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let content = String::from_utf8_lossy(line.content());
        let origin = line.origin();
        let prefix_len = usize::from(matches!(origin, '+' | '-' | ' '));

        if text.len() + prefix_len + content.len() > MAX_DIFF_LENGTH {
            truncated = true;
            return false;
        }

        if prefix_len == 1 {
            text.push(origin);
        }
        text.push_str(&content);
        true
    })
    .or_else(|e| {
        // Returning false from the callback surfaces as a user error.
        if truncated { Ok(()) } else { Err(GitError::DiffFailed(e)) }
    })?;

    Ok((text, truncated))
}
