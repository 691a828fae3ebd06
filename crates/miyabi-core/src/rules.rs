//! Ordered response rules, first match wins.
//!
//! Decision order: seed-if-empty, reset keywords, subscription commands,
//! politeness register, exact greetings, then the completion fallthrough.
//! Only the fallthrough touches the conversation after seeding.

use std::sync::Arc;

use miyabi_types::error::SubscriptionError;
use miyabi_types::llm::{CompletionRequest, LlmError, Message, MessageRole};

use crate::conversation::ConversationStore;
use crate::llm::LlmProvider;
use crate::persona;
use crate::subscription::SubscriptionStore;

/// Errors surfaced by the rules engine.
///
/// Completion failures are not converted to a canned reply; they propagate
/// so the webhook request fails (no retry policy).
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),

    #[error("subscription update failed: {0}")]
    Subscription(#[from] SubscriptionError),
}

/// The response rules engine.
///
/// Generic over the completion backend and subscription store; concrete
/// types are pinned in miyabi-api.
pub struct RulesEngine<P, S> {
    conversations: ConversationStore,
    provider: Arc<P>,
    subscriptions: Arc<S>,
    model: String,
    notifications_enabled: bool,
}

impl<P, S> RulesEngine<P, S>
where
    P: LlmProvider,
    S: SubscriptionStore,
{
    pub fn new(
        conversations: ConversationStore,
        provider: Arc<P>,
        subscriptions: Arc<S>,
        model: impl Into<String>,
        notifications_enabled: bool,
    ) -> Self {
        Self {
            conversations,
            provider,
            subscriptions,
            model: model.into(),
            notifications_enabled,
        }
    }

    /// Produce the reply for one inbound text message.
    ///
    /// Holds the user's conversation lock for the whole turn, so a user's
    /// messages are answered in order even when the platform delivers them
    /// concurrently.
    pub async fn respond(
        &self,
        user_id: &str,
        display_name: &str,
        text: &str,
    ) -> Result<String, RulesError> {
        let handle = self.conversations.entry(user_id);
        let mut conversation = handle.lock().await;

        if conversation.is_empty() {
            *conversation = persona::seed_conversation(display_name);
            tracing::debug!(user = %user_id, "seeded conversation");
        }

        if persona::RESET_KEYWORDS.contains(&text) {
            *conversation = persona::seed_conversation(display_name);
            tracing::info!(user = %user_id, "conversation reset");
            return Ok(persona::RESET_CONFIRMATION.to_string());
        }

        if text == persona::SUBSCRIBE_COMMAND || text == persona::UNSUBSCRIBE_COMMAND {
            return self.toggle_subscription(user_id, text).await;
        }

        if !persona::POLITE_FORMS.is_match(text) {
            return Ok(persona::IMPOLITE_REPLY.to_string());
        }

        if let Some(reply) = persona::greeting_reply(text) {
            return Ok(reply.to_string());
        }

        conversation.push(Message {
            role: MessageRole::User,
            content: text.to_string(),
        });

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: conversation.messages().to_vec(),
            max_tokens: None,
            temperature: None,
        };
        let response = self.provider.complete(&request).await?;
        tracing::debug!(
            user = %user_id,
            provider = %self.provider.name(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "completion received"
        );

        conversation.push(Message {
            role: MessageRole::Assistant,
            content: response.content.clone(),
        });

        Ok(response.content)
    }

    async fn toggle_subscription(
        &self,
        user_id: &str,
        command: &str,
    ) -> Result<String, RulesError> {
        if !self.notifications_enabled {
            return Ok(persona::NOTIFICATIONS_UNAVAILABLE.to_string());
        }

        if command == persona::SUBSCRIBE_COMMAND {
            let added = self.subscriptions.subscribe(user_id).await?;
            tracing::info!(user = %user_id, added, "weather subscription on");
            Ok(persona::SUBSCRIBE_CONFIRMATION.to_string())
        } else {
            let removed = self.subscriptions.unsubscribe(user_id).await?;
            tracing::info!(user = %user_id, removed, "weather subscription off");
            Ok(persona::UNSUBSCRIBE_CONFIRMATION.to_string())
        }
    }
}
