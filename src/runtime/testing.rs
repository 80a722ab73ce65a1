//! Mock resolvers for testing the runtime

use super::{ReplyResolver, SseEvent};
use crate::llm::ChatTurn;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, Notify};

/// Resolver that answers every history with the same text
pub struct MockResolver {
    reply: String,
    histories: Mutex<Vec<Vec<ChatTurn>>>,
}

impl MockResolver {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            histories: Mutex::new(Vec::new()),
        }
    }

    /// Histories received, in call order
    pub fn histories(&self) -> Vec<Vec<ChatTurn>> {
        self.histories.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplyResolver for MockResolver {
    async fn resolve(&self, history: &[ChatTurn]) -> String {
        self.histories.lock().unwrap().push(history.to_vec());
        self.reply.clone()
    }
}

/// Resolver that holds each reply until its gate is notified
pub struct GatedResolver {
    reply: String,
    gate: Arc<Notify>,
}

impl GatedResolver {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            gate: Arc::new(Notify::new()),
        }
    }

    pub fn gate(&self) -> Arc<Notify> {
        self.gate.clone()
    }
}

#[async_trait]
impl ReplyResolver for GatedResolver {
    async fn resolve(&self, _history: &[ChatTurn]) -> String {
        self.gate.notified().await;
        self.reply.clone()
    }
}

/// Drain events until the runtime announces it is idle again
pub async fn wait_for_idle(rx: &mut broadcast::Receiver<SseEvent>) {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match rx.recv().await {
                Ok(SseEvent::StateChange { composing: false }) => break,
                Ok(_) => {}
                Err(e) => panic!("event stream failed: {e}"),
            }
        }
    })
    .await
    .expect("runtime did not become idle");
}
