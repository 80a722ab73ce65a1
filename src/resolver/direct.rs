//! Tier B: direct provider call with a client-held credential

use super::{FailureKind, FailureReason, ReplyTier, ResolutionOutcome};
use crate::knowledge::KnowledgeBase;
use crate::llm::{with_persona, ChatTurn, OpenAIClient};
use async_trait::async_trait;
use std::sync::Arc;

/// Calls the provider directly. Without a credential it fails immediately
/// and touches no network.
pub struct DirectTier {
    /// `None` when no client credential is configured
    client: Option<OpenAIClient>,
    knowledge: Arc<KnowledgeBase>,
}

impl DirectTier {
    /// `client` must already carry the bearer credential and model
    pub fn new(client: Option<OpenAIClient>, knowledge: Arc<KnowledgeBase>) -> Self {
        Self { client, knowledge }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl ReplyTier for DirectTier {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn attempt(&self, history: &[ChatTurn]) -> ResolutionOutcome {
        let Some(client) = &self.client else {
            return ResolutionOutcome::Failure {
                reason: FailureReason::NoCredential,
                kind: FailureKind::ConfigurationAbsent,
                detail: "No client provider credential configured".to_string(),
            };
        };

        let messages = with_persona(&self.knowledge.persona, history);
        ResolutionOutcome::from_reply(FailureReason::Direct, client.complete(&messages).await)
    }
}
