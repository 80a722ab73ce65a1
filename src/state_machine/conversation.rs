//! Append-only message log paired with its state

use super::{transition, ConvState, DeliveryStatus, Effect, Event, Message, TransitionError};
use crate::llm::ChatTurn;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub composing: bool,
}

/// Message log plus the state machine that guards it
#[derive(Debug, Clone)]
pub struct Conversation {
    state: ConvState,
    messages: Vec<Message>,
}

impl Conversation {
    /// Start with a single bot greeting stamped one hour before `now`
    pub fn seeded(greeting: &str, now: DateTime<Utc>) -> Self {
        let timestamp = now - Duration::hours(1);
        let mut conversation = Self {
            state: ConvState::Idle,
            messages: Vec::new(),
        };
        let id = conversation.next_message_id(timestamp);
        conversation
            .messages
            .push(Message::bot(id, greeting, timestamp));
        conversation
    }

    pub fn state(&self) -> &ConvState {
        &self.state
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Id for the next message created at `timestamp`.
    ///
    /// The suffix is the position the message will take in the log, so ids
    /// stay unique even when many messages share a millisecond.
    pub fn next_message_id(&self, timestamp: DateTime<Utc>) -> String {
        format!("{}-{}", timestamp.timestamp_millis(), self.messages.len() + 1)
    }

    /// Protocol history of the whole log
    pub fn history(&self) -> Vec<ChatTurn> {
        self.messages.iter().map(Message::to_turn).collect()
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            messages: self.messages.clone(),
            composing: self.state.is_composing(),
        }
    }

    /// Run one transition and apply its log effects.
    ///
    /// On error nothing changes. The returned effects include the ones
    /// already applied so the caller can announce them.
    pub fn apply(&mut self, event: Event) -> Result<Vec<Effect>, TransitionError> {
        let result = transition(&self.state, event)?;

        for effect in &result.effects {
            match effect {
                Effect::AppendMessage { message } => self.messages.push(message.clone()),
                Effect::MarkRead { message_id } => self.mark_read(message_id),
                Effect::NotifyStateChange { .. } | Effect::RequestReply => {}
            }
        }
        self.state = result.new_state;

        Ok(result.effects)
    }

    fn mark_read(&mut self, message_id: &str) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == message_id) {
            message.status = Some(DeliveryStatus::Read);
        } else {
            tracing::warn!(message_id, "Pending message missing from log");
        }
    }

    /// Look up a message by id
    pub fn message(&self, message_id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == message_id)
    }
}
