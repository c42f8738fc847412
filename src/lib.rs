//! commit-genius - A CLI tool that writes commit messages for staged changes.
//!
//! # Overview
//!
//! commit-genius reads the staged diff of a git repository, asks a locally
//! running Ollama model for a short imperative summary, cleans the response
//! into a single subject line and optionally formats it as a Conventional
//! Commit before committing.

pub mod config;
pub mod editor;
pub mod error;
pub mod generate;
pub mod git;
pub mod i18n;
pub mod message;
pub mod ollama;

// Re-export commonly used types
pub use config::{Config, ConfigStore};
pub use error::{ConfigError, GenerateError, GitError, OllamaError};
pub use i18n::Language;
pub use message::{CommitType, MessageOptions, finalize_message};
pub use ollama::{InferenceClient, OllamaClient};
