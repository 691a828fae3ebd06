//! LINE Messaging API client (reply, push, profile lookup).

use serde_json::json;

use miyabi_core::messenger::Messenger;
use miyabi_types::error::MessagingError;
use miyabi_types::event::UserProfile;

/// Production API origin.
pub const LINE_API_BASE: &str = "https://api.line.me";

/// REST client for the LINE Messaging API, authenticated with the channel
/// access token.
pub struct LineClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl LineClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, LINE_API_BASE)
    }

    /// Point the client at a different origin (tests, proxies).
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// POST a message payload and map non-2xx statuses to `MessagingError`.
    async fn post_message(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<(), MessagingError> {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| MessagingError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MessagingError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    fn text_message(text: &str) -> serde_json::Value {
        json!({"type": "text", "text": text})
    }
}

impl Messenger for LineClient {
    async fn get_profile(&self, user_id: &str) -> Result<UserProfile, MessagingError> {
        let response = self
            .http
            .get(format!("{}/v2/bot/profile/{user_id}", self.base_url))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| MessagingError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MessagingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| MessagingError::InvalidResponse(e.to_string()))
    }

    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), MessagingError> {
        self.post_message(
            "/v2/bot/message/reply",
            json!({
                "replyToken": reply_token,
                "messages": [Self::text_message(text)],
            }),
        )
        .await
    }

    async fn push(&self, user_id: &str, text: &str) -> Result<(), MessagingError> {
        self.post_message(
            "/v2/bot/message/push",
            json!({
                "to": user_id,
                "messages": [Self::text_message(text)],
            }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_message_shape() {
        let msg = LineClient::text_message("こんにちは。");
        assert_eq!(msg["type"], "text");
        assert_eq!(msg["text"], "こんにちは。");
    }

    #[test]
    fn test_with_base_url_overrides_origin() {
        let client = LineClient::with_base_url("token", "http://127.0.0.1:9999");
        assert_eq!(client.base_url, "http://127.0.0.1:9999");
    }

    #[tokio::test]
    async fn test_unreachable_origin_maps_to_request_error() {
        // Nothing listens on port 1; the connection is refused immediately.
        let client = LineClient::with_base_url("token", "http://127.0.0.1:1");
        let err = client.reply("rt", "text").await.unwrap_err();
        assert!(matches!(err, MessagingError::Request(_)));
    }
}
