//! Ollama inference service: HTTP client, retries, model choice and prompts.

pub mod client;
pub mod model;
pub mod prompt;
pub mod retry;

pub use client::{
    CompletionRequest, DEFAULT_HOST, DEFAULT_MODEL, InferenceClient, MAX_TEMPERATURE,
    OllamaClient,
};
pub use model::select_model;
pub use prompt::{MAX_PROMPT_DIFF_LENGTH, build_prompt};
pub use retry::{complete_with_retry, retry_with_backoff};
