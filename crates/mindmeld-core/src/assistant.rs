//! Assistant conversation service.
//!
//! An append-only conversation log persisted in the key-value store. Asking
//! a question appends the user turn, sends the whole conversation (chat
//! shape) to the completion service, and appends the reply. A provider
//! failure keeps the user turn but records no assistant turn.

use mindmeld_types::error::RepositoryError;
use mindmeld_types::llm::{CompletionRequest, LlmError, Message};
use tracing::info;

use crate::llm::provider::CompletionProvider;
use crate::storage::keys;
use crate::storage::kv_store::{KvStore, get_or_default, set_json};

/// System prompt identifying the assistant.
const SYSTEM_PROMPT: &str =
    "You are the MindMeld assistant, a concise brainstorming companion. \
     Answer briefly and help the user develop their ideas.";

/// Errors from assistant operations.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Drives the assistant conversation.
pub struct AssistantService<P: CompletionProvider, K: KvStore> {
    provider: P,
    kv: K,
}

impl<P: CompletionProvider, K: KvStore> AssistantService<P, K> {
    pub fn new(provider: P, kv: K) -> Self {
        Self { provider, kv }
    }

    /// The stored conversation, oldest first.
    pub async fn history(&self) -> Result<Vec<Message>, RepositoryError> {
        get_or_default(&self.kv, keys::ASSISTANT_HISTORY).await
    }

    /// Send a question and return the assistant's reply.
    pub async fn ask(&self, model: &str, input: &str) -> Result<Message, AssistantError> {
        let mut conversation = self.history().await?;
        conversation.push(Message::user(input.trim()));
        set_json(&self.kv, keys::ASSISTANT_HISTORY, &conversation).await?;

        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(Message::system(SYSTEM_PROMPT));
        messages.extend(conversation.iter().cloned());

        let request = CompletionRequest::new(model, messages);
        let response = self.provider.complete(&request).await?;

        let reply = Message::assistant(response.content.trim());
        conversation.push(reply.clone());
        set_json(&self.kv, keys::ASSISTANT_HISTORY, &conversation).await?;
        info!(model, turns = conversation.len(), "assistant replied");
        Ok(reply)
    }

    /// Wipe the conversation.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.kv.delete(keys::ASSISTANT_HISTORY).await
    }
}
