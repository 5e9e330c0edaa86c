//! Shared wire types for the Charla relay protocol.
//!
//! The relay exposes a single `POST /chat` endpoint. Its request body is a
//! [`ChatRequest`], its success body a single assistant [`ChatTurn`], and
//! every non-200 response carries an [`ErrorBody`].

use serde::{Deserialize, Serialize};

/// The speaker role of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a conversation, tagged with its speaker role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// The `POST /chat` request body: the full ordered turn sequence.
///
/// The whole conversation is sent wholesale on every call; the relay keeps
/// no session state between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
}

/// Error payload returned by the relay for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );

        assert_eq!(
            serde_json::from_str::<Role>("\"assistant\"").unwrap(),
            Role::Assistant
        );
        assert!(serde_json::from_str::<Role>("\"tool\"").is_err());
    }

    #[test]
    fn test_chat_turn_wire_shape() {
        let turn = ChatTurn::user("Hola");
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Hola"}"#);

        let parsed: ChatTurn = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, turn);
    }

    #[test]
    fn test_chat_request_uses_messages_field() {
        let request = ChatRequest {
            messages: vec![ChatTurn::system("preamble"), ChatTurn::user("Hola")],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("messages").unwrap().is_array());
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Hola");
    }

    #[test]
    fn test_error_body_roundtrip() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"No autorizado: Verifica tu clave de API."}"#)
                .unwrap();
        assert_eq!(body.error, "No autorizado: Verifica tu clave de API.");
    }
}
