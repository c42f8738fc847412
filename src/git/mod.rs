//! Git operations using git2-rs.

pub mod staged;

pub use staged::{MAX_DIFF_LENGTH, StagedChanges, StagedRepo, is_repository};
