//! Heuristic commit type detection from staged diff text.
//!
//! This is a keyword/statistics heuristic, not a semantic classifier. The
//! contract is the rule order in [`RULES`]: the first matching rule wins.

use super::commit_type::CommitType;

/// Facts about a diff that the rules look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSignals {
    /// Lowercased diff text, for keyword matching.
    pub lowered: String,
    /// Lines starting with `+`, excluding `+++` file headers.
    pub additions: usize,
    /// Lines starting with `-`, excluding `---` file headers.
    pub deletions: usize,
}

impl DiffSignals {
    pub fn from_diff(diff: &str) -> Self {
        let mut additions = 0;
        let mut deletions = 0;

        for line in diff.lines() {
            if line.starts_with('+') && !line.starts_with("+++") {
                additions += 1;
            } else if line.starts_with('-') && !line.starts_with("---") {
                deletions += 1;
            }
        }

        Self {
            lowered: diff.to_lowercase(),
            additions,
            deletions,
        }
    }

    fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.lowered.contains(k))
    }
}

/// A single classification rule.
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&DiffSignals) -> bool,
    pub commit_type: CommitType,
}

/// Ordered rule list. Evaluated top to bottom.
pub const RULES: &[Rule] = &[
    Rule {
        name: "tests",
        matches: |s| s.mentions_any(&["test", "spec"]),
        commit_type: CommitType::Test,
    },
    Rule {
        name: "docs",
        matches: |s| s.mentions_any(&["readme", "doc", "comment"]),
        commit_type: CommitType::Docs,
    },
    Rule {
        name: "build",
        matches: |s| s.mentions_any(&["package.json", "webpack", "build"]),
        commit_type: CommitType::Build,
    },
    Rule {
        name: "ci",
        matches: |s| s.mentions_any(&["ci", "github/workflows"]),
        commit_type: CommitType::Ci,
    },
    Rule {
        name: "mostly-additions",
        matches: |s| s.additions > s.deletions * 2,
        commit_type: CommitType::Feat,
    },
    Rule {
        name: "fix-keywords",
        matches: |s| s.mentions_any(&["fix", "bug", "error"]),
        commit_type: CommitType::Fix,
    },
];

/// Type used when no rule matches.
pub const FALLBACK_TYPE: CommitType = CommitType::Feat;

/// Guess a commit type for the given diff text.
pub fn classify_diff(diff: &str) -> CommitType {
    let signals = DiffSignals::from_diff(diff);
    classify_signals(&signals)
}

pub fn classify_signals(signals: &DiffSignals) -> CommitType {
    RULES
        .iter()
        .find(|rule| (rule.matches)(signals))
        .map_or(FALLBACK_TYPE, |rule| rule.commit_type)
}
