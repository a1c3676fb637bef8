//! Upstream chat-completion client.
//!
//! One trait, three implementations: an HTTP client for the real
//! OpenAI-compatible API, a retrying wrapper that adds a single bounded
//! retry on transient failures over any inner client, and a fake with
//! canned responses for tests. Rejections and malformed bodies are never
//! retried.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::config::{LlmConfig, API_KEY_ENV};

/// Upstream failure classification. Everything maps to the same generic 500
/// at the HTTP surface; the distinction is for the server log.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("upstream request timed out after {0}s")]
    Timeout(u64),

    #[error("upstream rejected the request: HTTP {0}")]
    Rejected(u16),

    #[error("upstream response was malformed: {0}")]
    Malformed(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("{0} is not set in the environment")]
    MissingApiKey(&'static str),
}

impl LlmError {
    /// Only transient failures are worth a second attempt.
    fn is_retryable(&self) -> bool {
        matches!(self, LlmError::Timeout(_) | LlmError::Transport(_))
    }
}

/// A chat-completion backend producing a single text completion.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl<C: CompletionClient + ?Sized> CompletionClient for std::sync::Arc<C> {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).complete(prompt).await
    }
}

/// Adds a single bounded retry on transient failures to any inner client.
pub struct RetryingClient<C> {
    inner: C,
    retry_once: bool,
}

impl<C: CompletionClient> RetryingClient<C> {
    pub fn new(inner: C, retry_once: bool) -> Self {
        Self { inner, retry_once }
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for RetryingClient<C> {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        match self.inner.complete(prompt).await {
            Err(e) if self.retry_once && e.is_retryable() => {
                warn!("Upstream call failed ({}), retrying once", e);
                self.inner.complete(prompt).await
            }
            result => result,
        }
    }
}

/// Real client for an OpenAI-compatible /v1/chat/completions API.
pub struct HttpCompletionClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl HttpCompletionClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    async fn request_once(&self, prompt: &str, api_key: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        );

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.config.temperature,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.timeout_secs)
                } else {
                    LlmError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Rejected(status.as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::Malformed(e.to_string()))?;

        json.get("choices")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("message"))
            .and_then(|v| v.get("content"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| LlmError::Malformed("no completion content in response".to_string()))
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        // Key is read per call so rotation does not need a restart.
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| LlmError::MissingApiKey(API_KEY_ENV))?;

        self.request_once(prompt, &api_key).await
    }
}

/// Fake completion client for tests: returns canned responses in order and
/// counts calls so tests can assert the upstream was (not) invoked.
pub struct FakeCompletionClient {
    responses: Mutex<Vec<Result<String, LlmError>>>,
    calls: AtomicUsize,
}

impl FakeCompletionClient {
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
        }
    }

    /// A client that always returns the same completion text.
    pub fn always_ok(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// A client that always fails with the given error.
    pub fn always_error(error: LlmError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for FakeCompletionClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut responses = self.responses.lock().unwrap();
        match responses.len() {
            0 => Err(LlmError::Malformed("fake client has no responses".to_string())),
            // Keep replaying the last response.
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}
