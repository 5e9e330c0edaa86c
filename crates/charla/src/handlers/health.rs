//! Liveness and readiness handlers.
//!
//! The relay holds no state and opens no connections at startup, so both
//! probes answer unconditionally.

use axum::http::StatusCode;

pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

pub async fn readyz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
