//! Trait abstractions for runtime I/O
//!
//! The runtime only needs something that turns a history into a reply, so
//! the executor can be tested without any tier or network.

use crate::llm::ChatTurn;
use async_trait::async_trait;
use std::sync::Arc;

/// Produces the bot reply for a conversation history.
///
/// Implementations must always return a reply; failures are theirs to absorb.
#[async_trait]
pub trait ReplyResolver: Send + Sync {
    async fn resolve(&self, history: &[ChatTurn]) -> String;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: ReplyResolver + ?Sized> ReplyResolver for Arc<T> {
    async fn resolve(&self, history: &[ChatTurn]) -> String {
        (**self).resolve(history).await
    }
}
