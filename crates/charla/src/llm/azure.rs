//! Azure OpenAI chat-completions provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use charla_types::ChatTurn;

use super::error::LLMError;
use super::provider::LLMProvider;
use super::types::{CompletionRequest, CompletionResponse};

/// Azure OpenAI provider. Unlike the public OpenAI API, Azure routes by
/// deployment name in the URL path and authenticates with an `api-key`
/// header.
pub struct AzureOpenAIProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    deployment: String,
}

/// A required environment variable was not set.
#[derive(Debug, Error)]
#[error("missing environment variable {0}")]
pub struct MissingEnv(pub &'static str);

impl AzureOpenAIProvider {
    pub const DEFAULT_API_VERSION: &'static str = "2024-04-01-preview";

    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
            deployment: deployment.into(),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Build the provider from the environment:
    /// `AZURE_OPENAI_ENDPOINT`, `AZURE_OPENAI_API_KEY` and
    /// `AZURE_DEPLOYMENT_NAME` are required; `AZURE_OPENAI_API_VERSION`
    /// falls back to [`Self::DEFAULT_API_VERSION`].
    pub fn from_env() -> Result<Self, MissingEnv> {
        let endpoint = require_env("AZURE_OPENAI_ENDPOINT")?;
        let api_key = require_env("AZURE_OPENAI_API_KEY")?;
        let deployment = require_env("AZURE_DEPLOYMENT_NAME")?;
        let api_version = std::env::var("AZURE_OPENAI_API_VERSION")
            .unwrap_or_else(|_| Self::DEFAULT_API_VERSION.to_string());

        info!(%deployment, %api_version, "configured Azure OpenAI provider");
        Ok(
            Self::new(Client::new(), endpoint, api_key, deployment)
                .with_api_version(api_version),
        )
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version,
        )
    }
}

fn require_env(name: &'static str) -> Result<String, MissingEnv> {
    std::env::var(name).map_err(|_| MissingEnv(name))
}

#[async_trait]
impl LLMProvider for AzureOpenAIProvider {
    async fn complete(&self, turns: Vec<ChatTurn>) -> Result<ChatTurn, LLMError> {
        let request = CompletionRequest {
            model: self.deployment.clone(),
            messages: turns,
        };

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::Api {
                status,
                message: extract_api_message(&body),
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(LLMError::EmptyCompletion)
    }
}

// --- Azure error body ---

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    #[serde(default)]
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Pull the provider's own `error.message` out of a failure body, falling
/// back to a fixed string when the body carries none.
fn extract_api_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|detail| detail.message)
        .unwrap_or_else(|| "Error desconocido de la API.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_format() {
        let provider = AzureOpenAIProvider::new(
            Client::new(),
            "https://example.openai.azure.com",
            "key",
            "gpt-4o-mini",
        );
        assert_eq!(
            provider.completions_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o-mini/chat/completions?api-version=2024-04-01-preview"
        );
    }

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let provider = AzureOpenAIProvider::new(
            Client::new(),
            "https://example.openai.azure.com/",
            "key",
            "gpt-4o-mini",
        )
        .with_api_version("2025-01-01");
        assert_eq!(
            provider.completions_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o-mini/chat/completions?api-version=2025-01-01"
        );
    }

    #[test]
    fn test_extract_api_message_from_envelope() {
        let body = r#"{"error": {"code": "401", "message": "Access denied due to invalid subscription key."}}"#;
        assert_eq!(
            extract_api_message(body),
            "Access denied due to invalid subscription key."
        );
    }

    #[test]
    fn test_extract_api_message_fallback() {
        assert_eq!(extract_api_message("{}"), "Error desconocido de la API.");
        assert_eq!(
            extract_api_message("<html>gateway error</html>"),
            "Error desconocido de la API."
        );
    }
}
