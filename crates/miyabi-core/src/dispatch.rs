//! Webhook event dispatch.
//!
//! Routes already-verified events: text from a user goes through the rules
//! engine and back out via the event's reply token; text from a group or
//! room gets an echo; everything else is dropped with a debug log.

use std::sync::Arc;

use miyabi_types::error::MessagingError;
use miyabi_types::event::{EventSource, MessageContent, WebhookEvent};

use crate::llm::LlmProvider;
use crate::messenger::Messenger;
use crate::rules::{RulesEngine, RulesError};
use crate::subscription::SubscriptionStore;

/// Errors surfaced while handling one event.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Messaging(#[from] MessagingError),
}

/// Routes verified webhook events to the rules engine and the messenger.
pub struct EventDispatcher<P, S, M> {
    rules: RulesEngine<P, S>,
    messenger: Arc<M>,
}

impl<P, S, M> EventDispatcher<P, S, M>
where
    P: LlmProvider,
    S: SubscriptionStore,
    M: Messenger,
{
    pub fn new(rules: RulesEngine<P, S>, messenger: Arc<M>) -> Self {
        Self { rules, messenger }
    }

    /// Handle one event. Completion and messaging failures propagate.
    pub async fn dispatch(&self, event: WebhookEvent) -> Result<(), DispatchError> {
        match event {
            WebhookEvent::Message { reply_token, source, message, .. } => {
                match message {
                    MessageContent::Text { text, .. } => {
                        self.dispatch_text(&reply_token, &source, &text).await
                    }
                    MessageContent::Unknown => {
                        tracing::debug!("ignoring non-text message event");
                        Ok(())
                    }
                }
            }
            WebhookEvent::Unknown => {
                tracing::debug!("ignoring unsupported event type");
                Ok(())
            }
        }
    }

    async fn dispatch_text(
        &self,
        reply_token: &str,
        source: &EventSource,
        text: &str,
    ) -> Result<(), DispatchError> {
        match source {
            EventSource::User { user_id } => {
                let profile = self.messenger.get_profile(user_id).await?;
                let reply = self
                    .rules
                    .respond(user_id, &profile.display_name, text)
                    .await?;
                self.messenger.reply(reply_token, &reply).await?;
            }
            EventSource::Group { .. } | EventSource::Room { .. } => {
                // Group chats get no persona; echo so the bot stays visible.
                self.messenger
                    .reply(reply_token, &format!("Received message: {text}"))
                    .await?;
            }
        }
        Ok(())
    }
}
