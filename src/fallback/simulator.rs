//! Local response simulator
//!
//! Answers from canned replies after a short artificial "thinking" delay so
//! the degraded path feels like the remote ones. The delay gives way to the
//! shutdown token, so a pending simulation never holds up process exit.

use super::classify;
use crate::knowledge::KnowledgeBase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Default thinking time before a simulated reply
pub const DEFAULT_SIMULATOR_DELAY: Duration = Duration::from_millis(1000);

/// Deterministic reply generator backed by the keyword rules
#[derive(Clone)]
pub struct LocalSimulator {
    knowledge: Arc<KnowledgeBase>,
    delay: Duration,
    shutdown: CancellationToken,
}

impl LocalSimulator {
    pub fn new(knowledge: Arc<KnowledgeBase>, delay: Duration, shutdown: CancellationToken) -> Self {
        Self {
            knowledge,
            delay,
            shutdown,
        }
    }

    /// Canned reply for `text`, without any delay
    pub fn reply_for(&self, text: &str) -> &str {
        classify(text, &self.knowledge.rules)
            .and_then(|topic| self.knowledge.reply_for(topic))
            .unwrap_or(&self.knowledge.default_reply)
    }

    /// Canned reply for `text` after the configured delay
    pub async fn simulate(&self, text: &str) -> String {
        tokio::select! {
            () = tokio::time::sleep(self.delay) => {}
            () = self.shutdown.cancelled() => {
                tracing::debug!("Simulator delay cut short by shutdown");
            }
        }
        self.reply_for(text).to_string()
    }
}
