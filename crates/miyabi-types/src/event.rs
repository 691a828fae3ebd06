//! Inbound webhook payload types for the LINE Messaging API.
//!
//! Only the shapes the bot consumes are modelled: text message events and
//! their sources. Everything else deserializes into the `Unknown` variants
//! and is ignored by the dispatcher.

use serde::Deserialize;

/// Top-level webhook request body: a batch of events.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// A single webhook event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    /// A message from a user, group, or room.
    Message {
        /// One-time token tying a reply to this event.
        #[serde(rename = "replyToken")]
        reply_token: String,
        source: EventSource,
        message: MessageContent,
        #[serde(default)]
        timestamp: i64,
    },

    /// Any event type the bot does not handle (follow, unfollow, join, ...).
    #[serde(other)]
    Unknown,
}

/// Where an event originated.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventSource {
    User {
        #[serde(rename = "userId")]
        user_id: String,
    },
    Group {
        #[serde(rename = "groupId")]
        group_id: String,
    },
    Room {
        #[serde(rename = "roomId")]
        room_id: String,
    },
}

/// The message attached to a message event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text {
        #[serde(default)]
        id: String,
        text: String,
    },

    /// Stickers, images, and other non-text content.
    #[serde(other)]
    Unknown,
}

/// Profile of a messaging-platform user, fetched by user id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub display_name: String,
    #[serde(default)]
    pub user_id: String,
}
