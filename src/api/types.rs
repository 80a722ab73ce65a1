//! API request and response types

use crate::llm::ChatTurn;
use crate::state_machine::Message;
use serde::{Deserialize, Serialize};

/// Request to post a user message
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

/// Response for an accepted user message
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: Message,
}

/// Body of the backend proxy endpoint
#[derive(Debug, Deserialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
