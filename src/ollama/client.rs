//! HTTP client for a locally running Ollama service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OllamaError;

pub const DEFAULT_HOST: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama2";

/// Completions are capped at this temperature for short, consistent output.
pub const MAX_TEMPERATURE: f32 = 0.3;
/// Token budget for a single completion.
pub const DEFAULT_MAX_TOKENS: u32 = 50;

const TOP_P: f32 = 0.9;
const TOP_K: u32 = 40;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// A single completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Operations the CLI needs from an inference service.
///
/// This abstraction allows mocking the HTTP service in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Whether the service answers at all.
    async fn is_available(&self) -> bool;

    /// Names of the installed models.
    async fn list_models(&self) -> Result<Vec<String>, OllamaError>;

    /// Run a non-streaming completion and return the raw text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, OllamaError>;
}

/// Ollama REST client.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    host: String,
}

impl OllamaClient {
    pub fn new(host: impl Into<String>) -> Result<Self, OllamaError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(OllamaError::ClientSetup)?;

        Ok(Self {
            http,
            host: host.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    async fn fetch_tags(&self) -> Result<TagsResponse, OllamaError> {
        let url = self.endpoint("/api/tags");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| OllamaError::Unreachable { url, source })?;

        let response = ensure_success(response).await?;
        response
            .json()
            .await
            .map_err(|e| OllamaError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn is_available(&self) -> bool {
        match self.fetch_tags().await {
            Ok(_) => true,
            Err(e) => {
                debug!("Ollama availability check failed: {}", e);
                false
            }
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, OllamaError> {
        let tags = self.fetch_tags().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, OllamaError> {
        let url = self.endpoint("/api/generate");
        let body = GenerateRequest {
            model: &request.model,
            prompt: &request.prompt,
            stream: false,
            options: GenerateOptions {
                temperature: request.temperature.clamp(0.0, MAX_TEMPERATURE),
                num_predict: request.max_tokens,
                top_p: TOP_P,
                top_k: TOP_K,
            },
        };

        debug!(
            "Requesting completion from {} (model={}, prompt={} chars)",
            url,
            request.model,
            request.prompt.len()
        );

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|source| OllamaError::Unreachable { url, source })?;

        let response = ensure_success(response).await?;
        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::InvalidResponse(e.to_string()))?;

        if payload.response.trim().is_empty() {
            return Err(OllamaError::EmptyResponse);
        }

        Ok(payload.response)
    }
}

/// Turn a non-2xx response into [`OllamaError::Api`].
///
/// Ollama reports failures as `{"error": "..."}`; fall back to the status
/// reason when the body is something else.
async fn ensure_success(response: Response) -> Result<Response, OllamaError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    Err(OllamaError::Api {
        status: status.as_u16(),
        message,
    })
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_trailing_slash_is_trimmed() {
        let client = OllamaClient::new("http://example:11434/").unwrap();
        assert_eq!(client.endpoint("/api/tags"), "http://example:11434/api/tags");
    }

    #[test]
    fn test_default_host_is_local() {
        let client = OllamaClient::new(DEFAULT_HOST).unwrap();
        assert_eq!(client.host(), "http://localhost:11434");
    }

    #[test]
    fn test_generate_request_shape() {
        let body = GenerateRequest {
            model: "llama2",
            prompt: "diff",
            stream: false,
            options: GenerateOptions {
                temperature: 0.3,
                num_predict: 50,
                top_p: TOP_P,
                top_k: TOP_K,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama2");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 50);
        assert_eq!(json["options"]["top_k"], 40);
    }

    #[test]
    fn test_tags_response_tolerates_missing_models() {
        let tags: TagsResponse = serde_json::from_str("{}").unwrap();
        assert!(tags.models.is_empty());
    }

    #[test]
    fn test_completion_request_defaults() {
        let request = CompletionRequest::new("mistral", "prompt", 0.7);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(request.model, "mistral");
    }
}
