//! The conventional commit type vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Conventional commit types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    #[default]
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl CommitType {
    /// Every type, in canonical order.
    pub const ALL: [CommitType; 11] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Perf,
        CommitType::Test,
        CommitType::Build,
        CommitType::Ci,
        CommitType::Chore,
        CommitType::Revert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Chore => "chore",
            CommitType::Revert => "revert",
        }
    }

    /// Human-readable description, for help output.
    pub fn description(&self) -> &'static str {
        match self {
            CommitType::Feat => "A new feature",
            CommitType::Fix => "A bug fix",
            CommitType::Docs => "Documentation only changes",
            CommitType::Style => {
                "Changes that do not affect the meaning of the code (white-space, formatting, etc)"
            }
            CommitType::Refactor => "A code change that neither fixes a bug nor adds a feature",
            CommitType::Perf => "A code change that improves performance",
            CommitType::Test => "Adding missing tests or correcting existing tests",
            CommitType::Build => "Changes that affect the build system or external dependencies",
            CommitType::Ci => "Changes to our CI configuration files and scripts",
            CommitType::Chore => "Other changes that don't modify src or test files",
            CommitType::Revert => "Reverts a previous commit",
        }
    }

    /// Parse user-supplied text, falling back to `Feat` for anything outside
    /// the vocabulary.
    pub fn parse_lenient(s: &str) -> Self {
        s.trim().parse().unwrap_or(CommitType::Feat)
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        CommitType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == lowered)
            .ok_or_else(|| format!("Unknown commit type: {}", s))
    }
}
