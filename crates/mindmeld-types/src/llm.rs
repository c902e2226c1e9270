//! Completion-service request/response types for MindMeld.
//!
//! These types model the data shapes for the external LLM aggregator:
//! conversation messages, completion requests, and the provider error
//! taxonomy surfaced to the user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a conversation.
///
/// Doubles as the append-only assistant conversation log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Request to the completion service.
///
/// Carries the conversation in chat form; the provider implementation
/// decides (from the model catalog) whether to send it as a chat-style
/// or raw-completion-style request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl CompletionRequest {
    /// Default token cap for suggestion and assistant requests.
    pub const DEFAULT_MAX_TOKENS: u32 = 300;

    /// Default sampling temperature.
    pub const DEFAULT_TEMPERATURE: f64 = 0.8;

    /// Build a request with the default token cap and temperature.
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            temperature: Self::DEFAULT_TEMPERATURE,
        }
    }
}

/// Response from the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Raw text of the first choice.
    pub content: String,
    /// Model that actually served the request.
    pub model: String,
    /// Round-trip latency in milliseconds.
    pub response_ms: u64,
}

/// Errors from completion-service operations.
///
/// The first three variants carry distinct user-facing meanings mandated by
/// the provider's status codes; everything else collapses into `Provider`.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// HTTP 400 -- the model does not support the chosen request shape.
    #[error("the model does not support this request format")]
    InvalidRequest,

    /// HTTP 401 -- bad or missing API key.
    #[error("invalid API key")]
    AuthenticationFailed,

    /// HTTP 402 -- the model requires payment; suggest a free one.
    #[error("this model is paid; try a free model")]
    PaymentRequired,

    /// Any other provider or transport failure.
    #[error("the completion service returned an error")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// No API key configured; fatal before any request is attempted.
    #[error("no completion API key found (set {0})")]
    MissingApiKey(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [
            MessageRole::System,
            MessageRole::User,
            MessageRole::Assistant,
        ] {
            let parsed: MessageRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_message_serde_shape() {
        let msg = Message::user("hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hello"}"#);
    }

    #[test]
    fn test_completion_request_defaults() {
        let req = CompletionRequest::new("mistralai/mistral-nemo:free", vec![]);
        assert_eq!(req.max_tokens, 300);
        assert!((req.temperature - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_llm_error_messages_are_distinct() {
        let msgs = [
            LlmError::InvalidRequest.to_string(),
            LlmError::AuthenticationFailed.to_string(),
            LlmError::PaymentRequired.to_string(),
            LlmError::Provider {
                message: "boom".to_string(),
            }
            .to_string(),
        ];
        for (i, a) in msgs.iter().enumerate() {
            for b in &msgs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
