//! Effects produced by state transitions

use super::state::Message;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the log
    AppendMessage { message: Message },

    /// Move a user message from `sent` to `read`
    MarkRead { message_id: String },

    /// Tell connected clients the composing flag changed
    NotifyStateChange { composing: bool },

    /// Run the resolution pipeline on the updated history
    RequestReply,
}

impl Effect {
    pub fn append(message: Message) -> Self {
        Effect::AppendMessage { message }
    }

    pub fn composing(composing: bool) -> Self {
        Effect::NotifyStateChange { composing }
    }
}
