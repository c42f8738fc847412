//! Error types for commit-genius modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository (or any of the parent directories): {0}")]
    NotARepository(#[source] git2::Error),

    #[error("No staged changes. Stage files with `git add` first.")]
    NoStagedChanges,

    #[error("Failed to read staged changes: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Refusing to commit with an empty message")]
    EmptyMessage,

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    ConfigError(#[source] git2::Error),
}

/// Errors from the Ollama inference service.
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("No response from Ollama at {url}. Make sure Ollama is running. ({source})")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to configure HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("Ollama API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Ollama returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Ollama returned an empty completion")]
    EmptyResponse,

    #[error("No models found. Pull one first, e.g. `ollama pull llama2`")]
    NoModels,

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<OllamaError>),
}

impl OllamaError {
    /// Whether a later attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            OllamaError::Unreachable { .. } | OllamaError::EmptyResponse => true,
            OllamaError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Errors from configuration persistence.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the home directory")]
    NoHomeDir,

    #[error("Failed to read config {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Errors from the generate command.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Ollama(#[from] OllamaError),

    #[error("Ollama is not available at {host}. Start it with `ollama serve`.")]
    ServiceUnavailable { host: String },

    #[error("Interactive prompt failed: {0}")]
    PromptFailed(String),
}
