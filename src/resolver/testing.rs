//! Test doubles for the remote tiers
//!
//! `ScriptedTier` stands in for a tier without any network; `StubServer`
//! is a throwaway chat-completions endpoint on a random local port.

use super::{FailureKind, FailureReason, ReplyTier, ResolutionOutcome};
use crate::llm::ChatTurn;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

// ============================================================================
// Scripted tier
// ============================================================================

/// Tier that always returns the same outcome and counts its calls
pub struct ScriptedTier {
    name: &'static str,
    outcome: ResolutionOutcome,
    delay: Duration,
    calls: AtomicUsize,
    /// Histories received, in call order
    pub histories: Mutex<Vec<Vec<ChatTurn>>>,
}

#[allow(dead_code)]
impl ScriptedTier {
    pub fn succeeding(name: &'static str, text: impl Into<String>) -> Self {
        Self::new(name, ResolutionOutcome::Success { text: text.into() })
    }

    pub fn failing(name: &'static str, reason: FailureReason, kind: FailureKind) -> Self {
        Self::new(
            name,
            ResolutionOutcome::Failure {
                reason,
                kind,
                detail: format!("scripted {name} failure"),
            },
        )
    }

    fn new(name: &'static str, outcome: ResolutionOutcome) -> Self {
        Self {
            name,
            outcome,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            histories: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering, to model a slow network
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReplyTier for ScriptedTier {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn attempt(&self, history: &[ChatTurn]) -> ResolutionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.histories.lock().unwrap().push(history.to_vec());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }
}

// ============================================================================
// Stub HTTP server
// ============================================================================

/// A request captured by [`StubServer`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    /// Parsed JSON body, `Value::Null` when the body was not JSON
    pub body: Value,
}

/// Minimal chat-completions response with `text` as the reply
pub fn completion_body(text: &str) -> String {
    json!({
        "id": "chatcmpl-stub",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2 }
    })
    .to_string()
}

/// HTTP server answering every request with a fixed status and body
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: tokio::sync::oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<()>,
}

#[allow(dead_code)]
impl StubServer {
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();
        let body = body.into();

        let app = Router::new().fallback(move |headers: HeaderMap, raw: Bytes| {
            let recorded = recorded.clone();
            let body = body.clone();
            async move {
                recorded.lock().unwrap().push(RecordedRequest {
                    authorization: headers
                        .get(AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: serde_json::from_slice(&raw).unwrap_or(Value::Null),
                });
                (status, [(CONTENT_TYPE, "application/json")], body)
            }
        });

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            requests,
            shutdown: shutdown_tx,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/v1/chat/completions", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if tokio::time::timeout(Duration::from_secs(1), self.handle)
            .await
            .is_err()
        {
            eprintln!("stub server did not stop within 1s");
        }
    }

    /// URL on a local port with nothing listening
    pub async fn unreachable_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/v1/chat/completions")
    }
}
