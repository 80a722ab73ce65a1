//! Conversation state types

use crate::llm::ChatTurn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a message, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Delivery status of a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    #[allow(dead_code)] // Part of the wire vocabulary, never set by a transition
    Delivered,
    Read,
}

/// One entry of the chat thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Only user messages carry a status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeliveryStatus>,
}

impl Message {
    /// New user message with status `sent`
    pub fn user(id: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            sender: Sender::User,
            timestamp,
            status: Some(DeliveryStatus::Sent),
        }
    }

    pub fn bot(id: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            sender: Sender::Bot,
            timestamp,
            status: None,
        }
    }

    /// Protocol form: `user` stays `user`, `bot` becomes `assistant`
    pub fn to_turn(&self) -> ChatTurn {
        match self.sender {
            Sender::User => ChatTurn::user(&self.text),
            Sender::Bot => ChatTurn::assistant(&self.text),
        }
    }
}

/// Conversation state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConvState {
    /// Ready for user input, no reply in flight
    #[default]
    Idle,

    /// A reply is being resolved for the pending user message
    Composing { pending_message_id: String },
}

impl ConvState {
    pub fn is_composing(&self) -> bool {
        matches!(self, ConvState::Composing { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConvState::Idle => "idle",
            ConvState::Composing { .. } => "composing",
        }
    }
}
