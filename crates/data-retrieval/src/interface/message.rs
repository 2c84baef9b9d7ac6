//! Message types for host communication

use serde::{Deserialize, Serialize};

/// Kind of content carried by an inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    Text,
    Image,
    Voice,
    File,
}

/// Message delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub kind: ContentKind,
    pub content: String,
}

impl InboundMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            content: content.into(),
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == ContentKind::Text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyKind {
    Text,
}

/// Outgoing reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub kind: ReplyKind,
    pub content: String,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Text,
            content: content.into(),
        }
    }
}

/// What the host should do after a handler ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventAction {
    /// Let the next handler see the message
    #[default]
    Continue,
    /// Send the reply and stop further processing
    BreakPass,
}

/// Per-message handler context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub message: InboundMessage,
    pub reply: Option<Reply>,
    pub action: EventAction,
}

impl EventContext {
    pub fn new(message: InboundMessage) -> Self {
        Self {
            message,
            reply: None,
            action: EventAction::Continue,
        }
    }

    /// Set the reply and stop propagation
    pub fn reply_and_break(&mut self, content: impl Into<String>) {
        self.reply = Some(Reply::text(content));
        self.action = EventAction::BreakPass;
    }

    /// Whether a handler claimed this message
    pub fn is_handled(&self) -> bool {
        self.action == EventAction::BreakPass
    }
}
