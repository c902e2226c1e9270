//! OpenRouterProvider -- concrete [`CompletionProvider`] implementation.
//!
//! Sends requests to an OpenRouter-compatible API. Chat-capable models (per
//! the catalog in `mindmeld_types::model`) get `/chat/completions` with a
//! `messages` array; anything else falls back to `/completions` with the
//! conversation flattened into a `prompt` string.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

mod types;

use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};

use mindmeld_core::llm::provider::CompletionProvider;
use mindmeld_types::llm::{CompletionRequest, CompletionResponse, LlmError};
use mindmeld_types::model::is_chat_model;

use types::{ChatRequest, TextRequest, WireMessage, WireResponse};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// OpenRouter completion provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the Authorization header. It never appears in Debug output,
/// Display output, or tracing logs.
pub struct OpenRouterProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenRouterProvider {
    /// Create a new provider against the given base URL
    /// (e.g. `https://openrouter.ai/api/v1`).
    pub fn new(api_key: SecretString, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Create a provider from the environment.
    ///
    /// Fails with `LlmError::MissingApiKey` before any request is attempted
    /// when `OPENROUTER_API_KEY` is unset or empty.
    pub fn from_env(base_url: impl Into<String>) -> Result<Self, LlmError> {
        let key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::MissingApiKey(API_KEY_ENV))?;
        Ok(Self::new(SecretString::from(key), base_url))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Flatten a chat conversation into a raw completion prompt for models
    /// that do not accept the chat shape.
    fn flatten_prompt(request: &CompletionRequest) -> String {
        let mut prompt = String::new();
        for message in &request.messages {
            prompt.push_str(&format!("{}: {}\n", message.role, message.content));
        }
        prompt.push_str("assistant:");
        prompt
    }

    async fn send(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<WireResponse, LlmError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(self.api_key.expose_secret())
            .header("X-Title", "MindMeld")
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "completion request failed");
            return Err(match status.as_u16() {
                400 => LlmError::InvalidRequest,
                401 => LlmError::AuthenticationFailed,
                402 => LlmError::PaymentRequired,
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))
    }
}

// OpenRouterProvider intentionally does NOT derive Debug to keep the key
// out of any formatted output.

impl CompletionProvider for OpenRouterProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let started = Instant::now();

        let wire = if is_chat_model(&request.model) {
            let body = ChatRequest {
                model: request.model.clone(),
                messages: request
                    .messages
                    .iter()
                    .map(|m| WireMessage {
                        role: m.role.to_string(),
                        content: m.content.clone(),
                    })
                    .collect(),
                max_tokens: request.max_tokens,
                temperature: request.temperature,
            };
            self.send("/chat/completions", &body).await?
        } else {
            let body = TextRequest {
                model: request.model.clone(),
                prompt: Self::flatten_prompt(request),
                max_tokens: request.max_tokens,
                temperature: request.temperature,
            };
            self.send("/completions", &body).await?
        };

        let content = wire
            .first_choice_text()
            .ok_or_else(|| LlmError::Deserialization("response carried no choices".to_string()))?
            .to_string();
        let model = wire.model.unwrap_or_else(|| request.model.clone());

        Ok(CompletionResponse {
            content,
            model,
            response_ms: started.elapsed().as_millis() as u64,
        })
    }
}
