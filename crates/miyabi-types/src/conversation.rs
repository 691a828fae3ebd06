//! Append-only conversation history sent as model context.

use crate::llm::{Message, MessageRole};

/// Ordered sequence of role-tagged messages for one user.
///
/// Insertion order is significant: the sequence is the model context.
/// Messages can only be appended; a reset replaces the whole value with a
/// fresh seed. When non-empty, the first element is always the persona
/// system message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// An empty, not-yet-seeded conversation.
    pub fn new() -> Self {
        Self { messages: Vec::new() }
    }

    /// Build a conversation from an initial seed.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Append a message. Appended messages are never mutated or removed.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The full ordered history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Content of the leading system message, if the conversation is seeded.
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
    }
}
