//! Remote reply tiers
//!
//! Each tier makes at most one request and folds every possible failure into
//! a [`ResolutionOutcome`], so callers never see an error type.

mod backend;
mod direct;

#[cfg(test)]
pub mod testing;

pub use backend::BackendTier;
pub use direct::DirectTier;

use crate::llm::{ChatTurn, LlmError};
use async_trait::async_trait;
use std::sync::Arc;

/// Which tier gave up, as reported in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Backend,
    Direct,
    NoCredential,
}

impl FailureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureReason::Backend => "backend",
            FailureReason::Direct => "direct",
            FailureReason::NoCredential => "no-credential",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure taxonomy shared by all tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No HTTP response was obtained
    Transport,
    /// Non-success status or a body without a usable reply
    Protocol,
    /// The tier has no credential to work with
    ConfigurationAbsent,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Transport => "transport",
            FailureKind::Protocol => "protocol",
            FailureKind::ConfigurationAbsent => "configuration_absent",
        }
    }
}

impl From<&LlmError> for FailureKind {
    fn from(err: &LlmError) -> Self {
        if err.kind.is_transport() {
            FailureKind::Transport
        } else {
            FailureKind::Protocol
        }
    }
}

/// Result of one tier attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Success {
        text: String,
    },
    Failure {
        reason: FailureReason,
        kind: FailureKind,
        detail: String,
    },
}

impl ResolutionOutcome {
    /// Fold a client result into an outcome attributed to `reason`
    pub fn from_reply(reason: FailureReason, result: Result<String, LlmError>) -> Self {
        match result {
            Ok(text) => ResolutionOutcome::Success { text },
            Err(err) => ResolutionOutcome::Failure {
                reason,
                kind: FailureKind::from(&err),
                detail: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResolutionOutcome::Success { .. })
    }
}

/// One strategy for obtaining a bot reply
#[async_trait]
pub trait ReplyTier: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Make a single attempt with the full conversation history
    async fn attempt(&self, history: &[ChatTurn]) -> ResolutionOutcome;
}

#[async_trait]
impl<T: ReplyTier + ?Sized> ReplyTier for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn attempt(&self, history: &[ChatTurn]) -> ResolutionOutcome {
        (**self).attempt(history).await
    }
}
