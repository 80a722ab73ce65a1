//! Chat-completions protocol
//!
//! Shared wire types and the HTTP client used by every remote tier and by
//! the proxy endpoint.

mod error;
mod openai;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::{reply_text, OpenAIClient, DEFAULT_MODEL, OPENAI_CHAT_URL};
pub use types::*;
