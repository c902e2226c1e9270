//! Suggestion fetch orchestration.
//!
//! Builds the prompt from the current board, sends exactly one completion
//! request, and parses the response into suggestion texts. No retry, no
//! backoff; a failed fetch is reported and forgotten.

use mindmeld_types::idea::Idea;
use mindmeld_types::llm::{CompletionRequest, LlmError, Message};
use tracing::{debug, info};

use crate::llm::provider::CompletionProvider;
use crate::suggest::parse::parse_suggestions;
use crate::suggest::prompt::build_prompt;

/// Errors from a suggestion fetch.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("no model selected")]
    NoModel,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Parsed result of one suggestion fetch.
#[derive(Debug, Clone)]
pub struct SuggestionBatch {
    /// Cleaned suggestion texts, one per accepted line.
    pub texts: Vec<String>,
    /// Model that served the request.
    pub model: String,
    /// Round-trip latency in milliseconds.
    pub response_ms: u64,
}

/// Fetches complementary ideas from the completion service.
pub struct SuggestService<P: CompletionProvider> {
    provider: P,
}

impl<P: CompletionProvider> SuggestService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Request complementary ideas for the given board.
    pub async fn fetch(
        &self,
        model: &str,
        ideas: &[Idea],
    ) -> Result<SuggestionBatch, SuggestError> {
        if model.trim().is_empty() {
            return Err(SuggestError::NoModel);
        }

        let prompt = build_prompt(ideas);
        debug!(model, ideas = ideas.len(), "requesting suggestions");

        let request = CompletionRequest::new(model, vec![Message::user(prompt)]);
        let response = self.provider.complete(&request).await?;

        let texts = parse_suggestions(&response.content);
        info!(
            model = %response.model,
            suggestions = texts.len(),
            response_ms = response.response_ms,
            "suggestions received"
        );

        Ok(SuggestionBatch {
            texts,
            model: response.model,
            response_ms: response.response_ms,
        })
    }
}
