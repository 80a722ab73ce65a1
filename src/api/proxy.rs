//! Server side of the backend tier
//!
//! Forwards a conversation to the provider with the server credential and
//! the persona instruction, passing the provider's response through.

use super::types::ErrorResponse;
use crate::knowledge::KnowledgeBase;
use crate::llm::{with_persona, ChatTurn, OpenAIClient};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by the proxy endpoint, each with a fixed JSON body
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Missing OPENAI_API_KEY environment variable")]
    MissingCredential,
    #[error("OpenAI API error")]
    Upstream { status: StatusCode, details: String },
    #[error("Internal Server Error")]
    Internal,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ProxyError::MissingCredential | ProxyError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(message)),
            )
                .into_response(),
            ProxyError::Upstream { status, details } => (
                status,
                Json(ErrorResponse::new(message).with_details(details)),
            )
                .into_response(),
        }
    }
}

/// Provider client holding the server credential
pub struct ChatProxy {
    /// `None` when the server has no credential
    client: Option<OpenAIClient>,
    knowledge: Arc<KnowledgeBase>,
}

impl ChatProxy {
    pub fn new(client: Option<OpenAIClient>, knowledge: Arc<KnowledgeBase>) -> Self {
        Self { client, knowledge }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Forward `messages` upstream behind the persona instruction
    pub async fn forward(&self, messages: &[ChatTurn]) -> Result<Value, ProxyError> {
        let client = self.client.as_ref().ok_or(ProxyError::MissingCredential)?;
        let messages = with_persona(&self.knowledge.persona, messages);

        client.send(&messages).await.map_err(|e| match e.status {
            Some(status) => ProxyError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                details: e.body.unwrap_or_default(),
            },
            None => {
                tracing::error!(error = %e, kind = ?e.kind, "Proxy request failed");
                ProxyError::Internal
            }
        })
    }
}
