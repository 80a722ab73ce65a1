//! HTTP request handlers

use super::proxy::ProxyError;
use super::sse::sse_stream;
use super::types::{ErrorResponse, ProxyRequest, SubmitRequest, SubmitResponse};
use super::AppState;
use crate::runtime::SseEvent;
use crate::state_machine::{ConversationSnapshot, TransitionError};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Backend proxy for the first reply tier
        .route("/api/chat", post(proxy_chat))
        // Conversation for the presentation layer
        .route("/api/conversation", get(get_conversation))
        .route("/api/conversation/messages", post(submit_message))
        .route("/api/conversation/stream", get(stream_conversation))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Conversation
// ============================================================

async fn get_conversation(State(state): State<AppState>) -> Json<ConversationSnapshot> {
    Json(state.runtime.snapshot().await)
}

async fn submit_message(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("Message text is empty".to_string()));
    }

    let message = state.runtime.submit(&req.text).await?;

    Ok((StatusCode::ACCEPTED, Json(SubmitResponse { message })))
}

async fn stream_conversation(State(state): State<AppState>) -> impl IntoResponse {
    let (snapshot, broadcast_rx) = state.runtime.subscribe().await;
    sse_stream(
        SseEvent::Init { snapshot },
        broadcast_rx,
        state.shutdown.clone(),
    )
}

// ============================================================
// Backend proxy
// ============================================================

async fn proxy_chat(
    State(state): State<AppState>,
    Json(req): Json<ProxyRequest>,
) -> Result<Json<Value>, ProxyError> {
    let body = state.proxy.forward(&req.messages).await?;
    Ok(Json(body))
}

async fn get_version() -> &'static str {
    concat!("arena-chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Conflict(String),
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        AppError::Conflict(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
