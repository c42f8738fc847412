//! Conventional commit header formatting.

use super::clean::ELLIPSIS;
use super::commit_type::CommitType;

/// Maximum length of the header line (type + scope + subject), in characters.
pub const MAX_HEADER_LEN: usize = 72;

/// Build the `type(scope): ` or `type: ` prefix.
///
/// A blank scope counts as no scope.
pub fn header_prefix(commit_type: CommitType, scope: Option<&str>) -> String {
    match scope.map(str::trim).filter(|s| !s.is_empty()) {
        Some(scope) => format!("{}({}): ", commit_type, scope),
        None => format!("{}: ", commit_type),
    }
}

/// Format a message as a conventional commit.
///
/// The first line of `message` becomes the subject and any remaining lines
/// become the body, separated by a blank line. The header never exceeds
/// [`MAX_HEADER_LEN`] unless the prefix alone does.
pub fn format_conventional(message: &str, commit_type: CommitType, scope: Option<&str>) -> String {
    let prefix = header_prefix(commit_type, scope);

    let mut lines = message.trim().split('\n');
    let subject = lines.next().unwrap_or("").trim();
    let body = lines.collect::<Vec<_>>().join("\n");
    let body = body.trim();

    let subject = fit_subject(&prefix, subject);

    if body.is_empty() {
        format!("{prefix}{subject}")
    } else {
        format!("{prefix}{subject}\n\n{body}")
    }
}

/// Clip `subject` so that `prefix + subject` fits in [`MAX_HEADER_LEN`].
fn fit_subject(prefix: &str, subject: &str) -> String {
    let prefix_len = prefix.chars().count();
    if prefix_len + subject.chars().count() <= MAX_HEADER_LEN {
        return subject.to_string();
    }

    // Not even room for the ellipsis: emit the bare prefix.
    let Some(room) = MAX_HEADER_LEN.checked_sub(prefix_len + ELLIPSIS.len()) else {
        return String::new();
    };

    let mut clipped: String = subject.chars().take(room).collect();
    clipped.push_str(ELLIPSIS);
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(formatted: &str) -> &str {
        formatted.lines().next().unwrap_or("")
    }

    #[test]
    fn test_format_without_scope() {
        assert_eq!(format_conventional("Add tests", CommitType::Test, None), "test: Add tests");
    }

    #[test]
    fn test_format_with_scope() {
        assert_eq!(
            format_conventional("Add login endpoint", CommitType::Feat, Some("auth")),
            "feat(auth): Add login endpoint"
        );
    }

    #[test]
    fn test_blank_scope_is_ignored() {
        assert_eq!(
            format_conventional("Bump deps", CommitType::Chore, Some("  ")),
            "chore: Bump deps"
        );
    }

    #[test]
    fn test_unknown_type_text_falls_back_to_feat() {
        let formatted = format_conventional("msg", CommitType::parse_lenient("notarealtype"), None);
        assert!(formatted.starts_with("feat: "));
    }

    #[test]
    fn test_body_is_separated_by_blank_line() {
        let message = "Fix parser crash\nThe tokenizer read past the end\nof the buffer.\n";
        assert_eq!(
            format_conventional(message, CommitType::Fix, Some("parser")),
            "fix(parser): Fix parser crash\n\nThe tokenizer read past the end\nof the buffer."
        );
    }

    #[test]
    fn test_blank_body_is_dropped() {
        assert_eq!(
            format_conventional("Tidy imports\n   \n", CommitType::Style, None),
            "style: Tidy imports"
        );
    }

    #[test]
    fn test_long_subject_is_clipped_to_exactly_max() {
        let subject = "a".repeat(100);
        let formatted = format_conventional(&subject, CommitType::Refactor, Some("core"));
        let header = header(&formatted);
        assert_eq!(header.chars().count(), MAX_HEADER_LEN);
        assert!(header.starts_with("refactor(core): aaa"));
        assert!(header.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_subject_exactly_at_limit_is_untouched() {
        let prefix = "fix: ";
        let subject = "b".repeat(MAX_HEADER_LEN - prefix.len());
        let formatted = format_conventional(&subject, CommitType::Fix, None);
        assert_eq!(formatted, format!("{prefix}{subject}"));
    }

    #[test]
    fn test_header_never_exceeds_limit() {
        let long = "word ".repeat(30);
        let wide = "ü".repeat(90);
        let subjects: [&str; 4] = ["", "Short", &long, &wide];
        let scopes = [None, Some(""), Some("api"), Some("a-much-longer-scope-name-here")];

        for ty in CommitType::ALL {
            for subject in &subjects {
                for scope in &scopes {
                    let formatted = format_conventional(subject, ty, *scope);
                    assert!(
                        header(&formatted).chars().count() <= MAX_HEADER_LEN,
                        "header too long: {:?}",
                        header(&formatted)
                    );
                }
            }
        }
    }

    #[test]
    fn test_degenerate_scope_yields_bare_prefix() {
        let scope = "s".repeat(80);
        let formatted = format_conventional("Anything", CommitType::Feat, Some(&scope));
        assert_eq!(formatted, format!("feat({scope}): "));
    }

    #[test]
    fn test_short_clean_subject_round_trips() {
        let subject = "Update README";
        let formatted = format_conventional(subject, CommitType::Docs, None);
        assert_eq!(formatted.strip_prefix("docs: "), Some(subject));
    }
}
