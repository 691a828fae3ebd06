//! Application error type mapping to HTTP status codes.
//!
//! The platform contract is simple: signature problems and malformed
//! payloads are the caller's fault (400); completion and messaging failures
//! surface as 500 so the platform retries delivery.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use miyabi_core::dispatch::DispatchError;

#[derive(Debug)]
pub enum AppError {
    /// The signature header is absent.
    MissingSignature,
    /// The signature does not match the request body.
    InvalidSignature,
    /// The body passed verification but is not a valid webhook payload.
    BadPayload(String),
    /// Event handling failed downstream (completion or messaging call).
    Dispatch(DispatchError),
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        AppError::Dispatch(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingSignature => (
                StatusCode::BAD_REQUEST,
                "SIGNATURE_MISSING",
                "X-Line-Signature header required".to_string(),
            ),
            AppError::InvalidSignature => (
                StatusCode::BAD_REQUEST,
                "SIGNATURE_INVALID",
                "signature verification failed".to_string(),
            ),
            AppError::BadPayload(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_PAYLOAD", msg.clone())
            }
            AppError::Dispatch(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DISPATCH_FAILED", e.to_string())
            }
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
