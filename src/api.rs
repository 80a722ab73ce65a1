//! HTTP API for the chat widget
//!
//! Serves the conversation to the presentation layer and hosts the backend
//! proxy that the first reply tier talks to.

mod handlers;
mod proxy;
mod sse;
mod types;

pub use handlers::create_router;
pub use proxy::ChatProxy;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::{ConversationRuntime, ReplyResolver};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Runtime type the handlers work against
pub type SharedRuntime = ConversationRuntime<Arc<dyn ReplyResolver>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<SharedRuntime>,
    pub proxy: Arc<ChatProxy>,
    /// Cancelled when the server begins shutting down
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(runtime: Arc<SharedRuntime>, proxy: ChatProxy, shutdown: CancellationToken) -> Self {
        Self {
            runtime,
            proxy: Arc::new(proxy),
            shutdown,
        }
    }
}
