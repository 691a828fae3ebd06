//! Webhook receiver: `POST /callback`.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;

use miyabi_infra::line::signature::verify_signature;
use miyabi_types::event::WebhookPayload;

use crate::http::error::AppError;
use crate::state::AppState;

/// Signature header fixed by the platform.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// POST /callback - Receive a webhook delivery from the messaging platform.
///
/// The raw body is verified against the `X-Line-Signature` header before
/// anything is parsed or dispatched; a mismatch aborts with 400 and the
/// events never reach the rules engine. On success the platform expects the
/// literal body "OK".
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::MissingSignature)?;

    verify_signature(state.channel_secret.as_bytes(), &body, signature)
        .map_err(|_| AppError::InvalidSignature)?;

    tracing::debug!(body = %String::from_utf8_lossy(&body), "webhook request body");

    let payload: WebhookPayload =
        serde_json::from_slice(&body).map_err(|e| AppError::BadPayload(e.to_string()))?;

    for event in payload.events {
        state.dispatcher.dispatch(event).await?;
    }

    Ok("OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    use miyabi_infra::config::{AppConfig, ChatConfig, LineConfig};
    use miyabi_infra::line::signature::compute_signature;
    use tempfile::TempDir;

    const CHANNEL_SECRET: &str = "test-channel-secret";

    async fn test_state(data_dir: &TempDir) -> AppState {
        let config = AppConfig {
            line: LineConfig {
                access_token: "test-access-token".to_string(),
                channel_secret: CHANNEL_SECRET.to_string(),
            },
            chat: ChatConfig {
                base_url: "http://127.0.0.1:1/v1".to_string(),
                api_key: "test-key".to_string(),
                model: "mulabo_gpt35".to_string(),
            },
            weather: None,
            data_dir: data_dir.path().to_path_buf(),
        };
        AppState::init(config).await.unwrap()
    }

    fn signed_headers(body: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let sig = compute_signature(CHANNEL_SECRET.as_bytes(), body).unwrap();
        headers.insert(SIGNATURE_HEADER, sig.parse().unwrap());
        headers
    }

    #[tokio::test]
    async fn test_missing_signature_rejected() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp).await;

        let result = callback(
            State(state),
            HeaderMap::new(),
            Bytes::from_static(br#"{"events":[]}"#),
        )
        .await;

        assert!(matches!(result, Err(AppError::MissingSignature)));
    }

    #[tokio::test]
    async fn test_tampered_body_rejected_before_dispatch() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp).await;

        // Sign one body, deliver another. If verification did not gate
        // dispatch, the event below would hit the (unroutable) completion
        // endpoint and surface a Dispatch error instead.
        let headers = signed_headers(br#"{"events":[]}"#);
        let tampered = Bytes::from_static(
            br#"{"events":[{"type":"message","replyToken":"rt","source":{"type":"user","userId":"U1"},"message":{"type":"text","id":"m","text":"reset"}}]}"#,
        );

        let result = callback(State(state), headers, tampered).await;
        assert!(matches!(result, Err(AppError::InvalidSignature)));
    }

    #[tokio::test]
    async fn test_valid_signature_empty_events_ok() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp).await;

        let body: &[u8] = br#"{"events":[]}"#;
        let result = callback(State(state), signed_headers(body), Bytes::from_static(body)).await;

        assert_eq!(result.unwrap(), "OK");
    }

    #[tokio::test]
    async fn test_valid_signature_unknown_event_ignored() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp).await;

        let body: &[u8] =
            br#"{"events":[{"type":"follow","source":{"type":"user","userId":"U1"}}]}"#;
        let result = callback(State(state), signed_headers(body), Bytes::from_static(body)).await;

        assert_eq!(result.unwrap(), "OK");
    }

    #[tokio::test]
    async fn test_valid_signature_bad_json_rejected() {
        let tmp = TempDir::new().unwrap();
        let state = test_state(&tmp).await;

        let body: &[u8] = b"not json";
        let result = callback(State(state), signed_headers(body), Bytes::from_static(body)).await;

        assert!(matches!(result, Err(AppError::BadPayload(_))));
    }
}
