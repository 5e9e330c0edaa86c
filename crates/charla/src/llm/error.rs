//! LLM error types.

use thiserror::Error;

/// Errors that can occur when calling the hosted model provider.
#[derive(Debug, Error)]
pub enum LLMError {
    /// The HTTP request never produced a response.
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The provider answered 200 but the completion carried no choices.
    #[error("provider returned no completion choices")]
    EmptyCompletion,
}
