//! User configuration: typed settings plus dot-path access.
//!
//! The on-disk layout uses camelCase keys grouped in three sections:
//!
//! ```json
//! {
//!   "model": { "defaultModel": "llama2", "temperature": 0.7, "host": "http://localhost:11434" },
//!   "format": { "useConventionalCommits": false, "defaultType": null },
//!   "language": { "defaultLanguage": "en" }
//! }
//! ```

pub mod store;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::i18n::Language;
use crate::message::CommitType;
use crate::ollama::{DEFAULT_HOST, DEFAULT_MODEL};

pub use store::{CONFIG_ENV_VAR, ConfigStore};

const DEFAULT_TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub format: FormatConfig,
    pub language: LanguageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelConfig {
    pub default_model: String,
    pub temperature: f64,
    pub host: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            host: DEFAULT_HOST.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatConfig {
    pub use_conventional_commits: bool,
    /// Fixed commit type. `None` means classify from the diff.
    pub default_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageConfig {
    pub default_language: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default_language: Language::default().code().to_string(),
        }
    }
}

impl Config {
    pub fn language(&self) -> Language {
        Language::from_code(&self.language.default_language)
    }

    pub fn default_commit_type(&self) -> Option<CommitType> {
        self.format
            .default_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(CommitType::parse_lenient)
    }

    /// Look up a value by dot path, e.g. `model.temperature`.
    pub fn get(&self, key: &str) -> Result<Value, ConfigError> {
        let tree = self.to_value()?;
        lookup(&tree, key)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
    }

    /// Return a copy with `key` set to the coerced `raw` value.
    ///
    /// Only existing keys can be set, and the result must still be a valid
    /// configuration.
    pub fn with_value(&self, key: &str, raw: &str) -> Result<Config, ConfigError> {
        let mut tree = self.to_value()?;
        let slot = lookup_mut(&mut tree, key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        *slot = coerce_value(raw);

        serde_json::from_value(tree).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn to_value(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            key: String::new(),
            reason: e.to_string(),
        })
    }
}

/// Interpret command-line text as JSON: booleans, numbers and `null` are
/// recognised, anything else stays a string.
pub fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    match trimmed {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = trimmed.parse::<i64>() {
                return Value::from(n);
            }
            match trimmed.parse::<f64>() {
                Ok(f) if f.is_finite() => Value::from(f),
                _ => Value::String(raw.to_string()),
            }
        }
    }
}

fn lookup<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.')
        .try_fold(tree, |node, segment| node.as_object()?.get(segment))
}

fn lookup_mut<'a>(tree: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    key.split('.')
        .try_fold(tree, |node, segment| node.as_object_mut()?.get_mut(segment))
}
