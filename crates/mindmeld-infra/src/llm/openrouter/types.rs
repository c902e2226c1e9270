//! OpenRouter API wire types.
//!
//! Request/response structures for the OpenRouter HTTP API. These are
//! wire-specific; the provider-agnostic types live in mindmeld-types.

use serde::{Deserialize, Serialize};

/// Request body for `/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// A single message on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

/// Request body for the raw `/completions` shape, used for models not on
/// the chat allow-list.
#[derive(Debug, Clone, Serialize)]
pub struct TextRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Response body shared by both endpoints. Chat responses populate
/// `choices[].message`, raw completions populate `choices[].text`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<WireChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireChoice {
    #[serde(default)]
    pub message: Option<WireChoiceMessage>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireChoiceMessage {
    pub content: String,
}

impl WireResponse {
    /// Text of the first choice, whichever shape the endpoint used.
    pub fn first_choice_text(&self) -> Option<&str> {
        let choice = self.choices.first()?;
        if let Some(message) = &choice.message {
            return Some(&message.content);
        }
        choice.text.as_deref()
    }
}
