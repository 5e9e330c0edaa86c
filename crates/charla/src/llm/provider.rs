//! LLM provider trait.

use async_trait::async_trait;

use charla_types::ChatTurn;

use super::error::LLMError;

/// A hosted chat-completion backend the relay can forward turns to.
///
/// Handlers depend on `Arc<dyn LLMProvider>` so tests can substitute a
/// scripted implementation.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Forward the full turn sequence and return the assistant's reply.
    async fn complete(&self, turns: Vec<ChatTurn>) -> Result<ChatTurn, LLMError>;
}
