//! Process configuration read from the environment at start-up

use crate::fallback::DEFAULT_SIMULATOR_DELAY;
use crate::llm::{DEFAULT_MODEL, OPENAI_CHAT_URL};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the binary needs to wire the service together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Where the backend tier posts; defaults to this service's own proxy
    pub backend_url: String,
    pub provider_url: String,
    pub model: String,
    /// Credential the proxy uses upstream
    pub server_api_key: Option<String>,
    /// Credential for the direct tier
    pub client_api_key: Option<String>,
    pub request_timeout: Duration,
    pub simulator_delay: Duration,
    pub knowledge_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = parse_or(get("ARENA_PORT"), "ARENA_PORT", DEFAULT_PORT, |_| true);
        // A zero timeout would fail every remote request immediately
        let timeout_secs = parse_or(
            get("ARENA_REQUEST_TIMEOUT_SECS"),
            "ARENA_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT.as_secs(),
            |secs| secs > 0,
        );
        let delay_ms = parse_or(
            get("ARENA_SIMULATOR_DELAY_MS"),
            "ARENA_SIMULATOR_DELAY_MS",
            u64::try_from(DEFAULT_SIMULATOR_DELAY.as_millis()).unwrap_or(1000),
            |_| true,
        );

        Self {
            port,
            backend_url: get("ARENA_BACKEND_URL")
                .unwrap_or_else(|| format!("http://127.0.0.1:{port}/api/chat")),
            provider_url: get("ARENA_PROVIDER_URL").unwrap_or_else(|| OPENAI_CHAT_URL.to_string()),
            model: get("ARENA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            server_api_key: get("OPENAI_API_KEY"),
            client_api_key: get("ARENA_CLIENT_API_KEY"),
            request_timeout: Duration::from_secs(timeout_secs),
            simulator_delay: Duration::from_millis(delay_ms),
            knowledge_path: get("ARENA_KNOWLEDGE_PATH").map(PathBuf::from),
        }
    }
}

/// Parse `value`, falling back to `default` when it is unset, unparseable
/// or rejected by `valid`
fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    value: Option<String>,
    key: &str,
    default: T,
    valid: impl Fn(T) -> bool,
) -> T {
    let Some(raw) = value else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(parsed) if valid(parsed) => parsed,
        _ => {
            tracing::warn!(key, value = %raw, default = %default, "Invalid number, using default");
            default
        }
    }
}
