//! LLM provider client for chat completions.

mod azure;
mod error;
mod provider;
mod types;

pub use azure::{AzureOpenAIProvider, MissingEnv};
pub use error::LLMError;
pub use provider::LLMProvider;
pub use types::{Choice, CompletionRequest, CompletionResponse, Usage};
