//! Response resolution pipeline
//!
//! Runs the remote tiers strictly in order and falls back to the local
//! simulator when every one of them fails. Exactly one reply comes out of
//! every run; tier failures are logged and go no further.

use crate::fallback::LocalSimulator;
use crate::llm::{latest_user_text, ChatTurn};
use crate::resolver::{ReplyTier, ResolutionOutcome};
use crate::runtime::ReplyResolver;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Ordered fallback chain ending in the local simulator
pub struct ResponsePipeline {
    tiers: Vec<Arc<dyn ReplyTier>>,
    simulator: LocalSimulator,
}

impl ResponsePipeline {
    /// `tiers` are attempted in the given order
    pub fn new(tiers: Vec<Arc<dyn ReplyTier>>, simulator: LocalSimulator) -> Self {
        Self { tiers, simulator }
    }

    /// Produce the bot reply for the latest user turn in `history`
    pub async fn resolve(&self, history: &[ChatTurn]) -> String {
        for tier in &self.tiers {
            let start = Instant::now();
            let outcome = tier.attempt(history).await;
            let duration = start.elapsed();

            match outcome {
                ResolutionOutcome::Success { text } => {
                    tracing::info!(
                        tier = tier.name(),
                        duration_ms = %duration.as_millis(),
                        "Reply resolved"
                    );
                    return text;
                }
                ResolutionOutcome::Failure {
                    reason,
                    kind,
                    detail,
                } => {
                    tracing::warn!(
                        tier = tier.name(),
                        reason = %reason,
                        kind = kind.as_str(),
                        duration_ms = %duration.as_millis(),
                        error = %detail,
                        "Tier failed, falling through"
                    );
                }
            }
        }

        let reply = self.simulator.simulate(latest_user_text(history)).await;
        tracing::info!(tier = "local", "Reply resolved by simulator");
        reply
    }
}

#[async_trait]
impl ReplyResolver for ResponsePipeline {
    async fn resolve(&self, history: &[ChatTurn]) -> String {
        ResponsePipeline::resolve(self, history).await
    }
}
