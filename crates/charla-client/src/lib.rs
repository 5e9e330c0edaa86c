//! Typed HTTP client for the Charla relay.

use thiserror::Error;

use charla_types::{ChatRequest, ChatTurn, ErrorBody};

/// Where the relay listens during development.
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3001";

/// Errors that can occur when talking to the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The HTTP call never produced a response.
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with an error payload.
    #[error("relay error (status {status}): {message}")]
    Relay { status: u16, message: String },
}

impl RelayError {
    /// Human-facing banner text for the chat pane.
    pub fn banner(&self) -> String {
        match self {
            RelayError::Transport(_) => {
                "No se pudo conectar con el relay. Verifica que esté en ejecución.".to_string()
            }
            RelayError::Relay { message, .. } => message.clone(),
        }
    }
}

/// Client for the relay's `POST /chat` endpoint.
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST the full turn sequence and return the assistant's reply.
    pub async fn send(&self, turns: &[ChatTurn]) -> Result<ChatTurn, RelayError> {
        let request = ChatRequest {
            messages: turns.to_vec(),
        };

        let response = self
            .http
            .post(format!("{}/chat", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => "Error desconocido del relay.".to_string(),
            };
            return Err(RelayError::Relay { status, message });
        }

        Ok(response.json().await?)
    }

    /// Startup connection check, mirroring the front-end probe call.
    pub async fn probe(&self) -> Result<(), RelayError> {
        self.send(&[ChatTurn::system("Test connection.")])
            .await
            .map(|_| ())
    }
}
