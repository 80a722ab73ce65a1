//! Events that can occur in a conversation

use chrono::{DateTime, Utc};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The user sent a message
    Submit {
        id: String,
        text: String,
        timestamp: DateTime<Utc>,
    },

    /// The pipeline produced the bot reply
    Resolved {
        id: String,
        text: String,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Submit { .. } => "submit",
            Event::Resolved { .. } => "resolved",
        }
    }
}
