//! `OpenAI`-compatible chat-completions client
//!
//! Used for the proxied backend (no credential, same wire format), the
//! direct provider call, and the server-side proxy forwarding upstream.

use super::types::ChatTurn;
use super::LlmError;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Default provider endpoint
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model used for direct and proxied requests
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Client for a single chat-completions endpoint
#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl OpenAIClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
            model: None,
        })
    }

    /// Send `Authorization: Bearer <key>` with every request
    pub fn with_bearer(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Include a `model` field in every request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the messages and return the parsed response body.
    ///
    /// Non-2xx statuses become errors carrying the status and raw body.
    pub async fn send(&self, messages: &[ChatTurn]) -> Result<Value, LlmError> {
        let request = ChatCompletionRequest {
            model: self.model.as_deref(),
            messages,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::network(format!("Request timeout: {e}"))
            } else if e.is_connect() {
                LlmError::network(format!("Connection failed: {e}"))
            } else {
                LlmError::network(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(LlmError::from_status(status.as_u16(), body));
        }

        serde_json::from_str(&body)
            .map_err(|e| LlmError::malformed(format!("Failed to parse response: {e}")))
    }

    /// POST the messages and extract the reply text
    pub async fn complete(&self, messages: &[ChatTurn]) -> Result<String, LlmError> {
        let body = self.send(messages).await?;
        reply_text(&body)
    }
}

/// Extract `choices[0].message.content`, rejecting absent or blank replies
pub fn reply_text(body: &Value) -> Result<String, LlmError> {
    let text = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| LlmError::malformed("No choices[0].message.content in response"))?;

    if text.trim().is_empty() {
        return Err(LlmError::malformed("Empty reply content"));
    }

    Ok(text.to_string())
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: &'a [ChatTurn],
}
