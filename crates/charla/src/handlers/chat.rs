//! The relay endpoint: validate the turn sequence, forward it to the
//! provider, and translate provider failures into fixed client-facing
//! messages.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tracing::{info, warn};

use charla_types::{ChatTurn, Role};

use crate::llm::LLMError;
use crate::response;
use crate::server::AppState;

// ============================================================================
// Client-facing messages
// ============================================================================

const MISSING_MESSAGES: &str = "Debes proporcionar un arreglo de mensajes.";
const INVALID_MESSAGE: &str = "Los mensajes deben tener un rol y contenido válidos.";
const UNREACHABLE: &str = "No se pudo conectar con la API. Verifica tu conexión a internet.";

/// One row of the provider-status translation table.
struct ErrorMapping {
    provider_status: u16,
    outward: StatusCode,
    message: &'static str,
    /// Append the provider's own error message behind the fixed prefix.
    append_detail: bool,
}

/// Provider HTTP status -> outward status and message. Statuses missing from
/// the table fall through to a 500 with the provider message attached.
const PROVIDER_ERRORS: &[ErrorMapping] = &[
    ErrorMapping {
        provider_status: 400,
        outward: StatusCode::BAD_REQUEST,
        message: "Solicitud incorrecta: ",
        append_detail: true,
    },
    ErrorMapping {
        provider_status: 401,
        outward: StatusCode::UNAUTHORIZED,
        message: "No autorizado: Verifica tu clave de API.",
        append_detail: false,
    },
    ErrorMapping {
        provider_status: 403,
        outward: StatusCode::FORBIDDEN,
        message: "Acceso denegado: No tienes permisos para acceder al recurso.",
        append_detail: false,
    },
    ErrorMapping {
        provider_status: 404,
        outward: StatusCode::NOT_FOUND,
        message: "Recurso no encontrado: Verifica el endpoint y el modelo.",
        append_detail: false,
    },
    ErrorMapping {
        provider_status: 429,
        outward: StatusCode::TOO_MANY_REQUESTS,
        message: "Demasiadas solicitudes: Inténtalo de nuevo más tarde.",
        append_detail: false,
    },
    ErrorMapping {
        provider_status: 500,
        outward: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Error interno del servidor: Inténtalo de nuevo más tarde.",
        append_detail: false,
    },
];

// ============================================================================
// Handler
// ============================================================================

/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Ok(Json(payload)) = body else {
        return response::bad_request(MISSING_MESSAGES).into_response();
    };

    let Some(raw_messages) = payload.get("messages").and_then(Value::as_array) else {
        return response::bad_request(MISSING_MESSAGES).into_response();
    };

    let mut turns = Vec::with_capacity(raw_messages.len());
    for raw in raw_messages {
        let Some(turn) = parse_turn(raw) else {
            return response::bad_request(INVALID_MESSAGE).into_response();
        };
        turns.push(turn);
    }

    let outgoing = with_preamble(&state.preamble, turns);

    info!(turns = outgoing.len(), "forwarding chat request to provider");
    match state.provider.complete(outgoing).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => {
            warn!(error = %e, "provider call failed");
            let (status, message) = map_provider_error(&e);
            response::error(status, message).into_response()
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Parse one raw turn, requiring a known role and non-empty string content.
fn parse_turn(raw: &Value) -> Option<ChatTurn> {
    let role = match raw.get("role").and_then(Value::as_str) {
        Some("system") => Role::System,
        Some("user") => Role::User,
        Some("assistant") => Role::Assistant,
        _ => return None,
    };
    let content = raw.get("content").and_then(Value::as_str)?;
    if content.is_empty() {
        return None;
    }
    Some(ChatTurn::new(role, content))
}

/// Prefix the configured system preamble unless the conversation already
/// opens with its own system turn (the stock front-end sends one).
fn with_preamble(preamble: &str, turns: Vec<ChatTurn>) -> Vec<ChatTurn> {
    if matches!(turns.first(), Some(turn) if turn.role == Role::System) {
        return turns;
    }
    let mut outgoing = Vec::with_capacity(turns.len() + 1);
    outgoing.push(ChatTurn::system(preamble));
    outgoing.extend(turns);
    outgoing
}

/// Translate a provider failure into the outward status and message.
fn map_provider_error(error: &LLMError) -> (StatusCode, String) {
    match error {
        LLMError::Request(_) => (StatusCode::INTERNAL_SERVER_ERROR, UNREACHABLE.to_string()),
        LLMError::EmptyCompletion => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error interno del servidor: {error}"),
        ),
        LLMError::Api { status, message } => {
            match PROVIDER_ERRORS.iter().find(|m| m.provider_status == *status) {
                Some(m) if m.append_detail => (m.outward, format!("{}{}", m.message, message)),
                Some(m) => (m.outward, m.message.to_string()),
                None => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error en la API: {message}"),
                ),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
