//! Supported languages and localized CLI strings.

pub mod messages;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use messages::Message;

/// Languages the prompts, boilerplate tables and CLI strings are available in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Vi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Vi];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Vi => "vi",
        }
    }

    /// Parse a language code such as `vi` or `en-US`.
    ///
    /// Region suffixes are ignored and unsupported codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_lowercase();

        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == primary)
            .unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
