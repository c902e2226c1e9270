//! Completion provider trait.
//!
//! Defines the interface to the external LLM aggregator. The concrete
//! implementation lives in mindmeld-infra and decides the wire shape
//! (chat vs. raw completion) from the model catalog.

use mindmeld_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for the external completion service.
///
/// One request per call: no retry, no backoff, no streaming. Uses RPITIT
/// (native async fn in traits).
pub trait CompletionProvider: Send + Sync {
    /// Send a single completion request and return the first choice's text.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
