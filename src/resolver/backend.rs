//! Tier A: the proxied backend endpoint

use super::{FailureReason, ReplyTier, ResolutionOutcome};
use crate::knowledge::KnowledgeBase;
use crate::llm::{with_persona, ChatTurn, OpenAIClient};
use async_trait::async_trait;
use std::sync::Arc;

/// Calls the service's own `/api/chat` proxy, which holds the server-side
/// provider credential.
pub struct BackendTier {
    client: OpenAIClient,
    knowledge: Arc<KnowledgeBase>,
}

impl BackendTier {
    pub fn new(client: OpenAIClient, knowledge: Arc<KnowledgeBase>) -> Self {
        Self { client, knowledge }
    }
}

#[async_trait]
impl ReplyTier for BackendTier {
    fn name(&self) -> &'static str {
        "backend"
    }

    async fn attempt(&self, history: &[ChatTurn]) -> ResolutionOutcome {
        let messages = with_persona(&self.knowledge.persona, history);
        tracing::debug!(endpoint = %self.client.endpoint(), turns = messages.len(), "Requesting backend reply");
        ResolutionOutcome::from_reply(FailureReason::Backend, self.client.complete(&messages).await)
    }
}
