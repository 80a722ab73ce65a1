//! Runtime for the single session conversation
//!
//! Owns the message log, drives the state machine, runs reply resolution in
//! the background and streams every change to subscribers.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::ConversationRuntime;
pub use traits::*;

use crate::state_machine::{ConversationSnapshot, Message};
use serde::Serialize;

/// Events sent to SSE clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SseEvent {
    /// Full snapshot, sent first on every new stream
    Init { snapshot: ConversationSnapshot },
    /// A message was appended to the log
    Message { message: Message },
    /// An existing message changed status
    MessageUpdated { message: Message },
    StateChange { composing: bool },
}

impl SseEvent {
    /// Name used for the SSE `event:` field
    pub fn event_name(&self) -> &'static str {
        match self {
            SseEvent::Init { .. } => "init",
            SseEvent::Message { .. } => "message",
            SseEvent::MessageUpdated { .. } => "message_updated",
            SseEvent::StateChange { .. } => "state_change",
        }
    }
}
