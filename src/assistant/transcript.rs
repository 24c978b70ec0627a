//! Chat transcript kept alongside an assistant session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person at the keyboard.
    User,
    /// The assistant.
    Assistant,
}

/// Message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Plain conversation.
    #[default]
    Text,
    /// Reply to a command that was applied.
    Command,
    /// Reply to a command that was refused or could not be resolved.
    Error,
    /// Session notices such as the welcome text.
    System,
}

/// One entry in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message id.
    pub id: String,
    /// Author.
    pub sender: Sender,
    /// Category.
    pub kind: MessageKind,
    /// Message text.
    pub content: String,
    /// When the message was recorded.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message stamped with the current time.
    pub fn new(sender: Sender, kind: MessageKind, content: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4().to_string(), sender, kind, content: content.into(), timestamp: Utc::now() }
    }
}

/// Ordered list of chat messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript opened with the assistant's welcome messages.
    pub fn with_welcome() -> Self {
        let mut transcript = Self::new();
        transcript.push(ChatMessage::new(
            Sender::Assistant,
            MessageKind::System,
            "Hello! I'm your presentation assistant. I can help you edit slides, improve content, \
             and navigate your presentation.",
        ));
        transcript.push(ChatMessage::new(
            Sender::Assistant,
            MessageKind::System,
            "Try asking me to:\n• \"Edit the title to Quarterly Results\"\n• \"Go to slide 3\"\n\
             • \"Analyze this presentation\"\n• \"Make the text larger\"",
        ));
        transcript
    }

    /// Append a message.
    pub fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Record what the user typed.
    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::new(Sender::User, MessageKind::Text, content))
    }

    /// Record an assistant reply.
    pub fn push_assistant(&mut self, kind: MessageKind, content: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::new(Sender::Assistant, kind, content))
    }

    /// All messages in order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Most recent message.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when no messages have been recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
