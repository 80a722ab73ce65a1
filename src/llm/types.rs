//! Protocol message types

use serde::{Deserialize, Serialize};

/// Role of a protocol message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One `{role, content}` entry of a chat-completions request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Prepend the persona instruction to a history, dropping any system turns
/// already present so the persona cannot be overridden by the caller.
pub fn with_persona(persona: &str, history: &[ChatTurn]) -> Vec<ChatTurn> {
    std::iter::once(ChatTurn::system(persona))
        .chain(
            history
                .iter()
                .filter(|turn| turn.role != ChatRole::System)
                .cloned(),
        )
        .collect()
}

/// Text of the most recent user turn, or an empty string
pub fn latest_user_text(history: &[ChatTurn]) -> &str {
    history
        .iter()
        .rev()
        .find(|turn| turn.role == ChatRole::User)
        .map_or("", |turn| turn.content.as_str())
}
