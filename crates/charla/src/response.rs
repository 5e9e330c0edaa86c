//! JSON error response helpers shared by handlers.

use axum::Json;
use axum::http::StatusCode;

use charla_types::ErrorBody;

/// Build an error response with the given status and message.
pub fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

pub fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    error(StatusCode::BAD_REQUEST, message)
}
