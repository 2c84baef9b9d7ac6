//! Host chat framework surface
//!
//! Types the plugin exchanges with the chat host: inbound messages, replies
//! and the per-event context that carries the "stop propagation" signal.

pub mod message;

pub use message::{ContentKind, EventAction, EventContext, InboundMessage, Reply, ReplyKind};
