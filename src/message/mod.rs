//! Turning raw model output into a final commit message.
//!
//! Three pure pieces, composed by [`finalize_message`]:
//! - [`clean`] reduces a completion to one subject line
//! - [`classify`] guesses a commit type from the diff
//! - [`conventional`] builds the `type(scope): subject` header

pub mod classify;
pub mod clean;
pub mod commit_type;
pub mod conventional;

pub use classify::{DiffSignals, classify_diff};
pub use clean::{SUBJECT_MAX_LEN, clean_response};
pub use commit_type::CommitType;
pub use conventional::{MAX_HEADER_LEN, format_conventional};

/// How the final message should be shaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOptions {
    /// Apply conventional commit formatting.
    pub conventional: bool,
    /// Explicit type. Classified from the diff when `None`.
    pub commit_type: Option<CommitType>,
    pub scope: Option<String>,
    pub max_subject_len: usize,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            conventional: false,
            commit_type: None,
            scope: None,
            max_subject_len: SUBJECT_MAX_LEN,
        }
    }
}

/// Produce the final commit message from a raw completion and the diff it
/// describes.
pub fn finalize_message(raw_completion: &str, diff: &str, options: &MessageOptions) -> String {
    let subject = clean_response(raw_completion, options.max_subject_len);

    if !options.conventional {
        return subject;
    }

    let commit_type = options
        .commit_type
        .unwrap_or_else(|| classify_diff(diff));

    format_conventional(&subject, commit_type, options.scope.as_deref())
}
