//! Completion provider port
//!
//! Defines how the application layer asks a model for its next action.
//! Transports (HTTP clients, recorded replays) live in the infrastructure
//! layer.

use async_trait::async_trait;
use brigade_domain::{LlmResponse, Transcript};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a completion request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("No more responses available")]
    Exhausted,

    #[error("Other error: {0}")]
    Other(String),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout)
    }
}

/// Model-completion provider
///
/// `tools` is the JSON Schema of every tool the model may request (see
/// [`ToolSchemaPort`](super::tool_schema::ToolSchemaPort)); it is empty for
/// plain text completions.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        transcript: &Transcript,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, ProviderError>;
}

/// Call the provider, mapping an elapsed `timeout` to [`ProviderError::Timeout`].
pub async fn complete_with_timeout(
    provider: &dyn CompletionProvider,
    transcript: &Transcript,
    tools: &[serde_json::Value],
    timeout: Option<Duration>,
) -> Result<LlmResponse, ProviderError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, provider.complete(transcript, tools))
            .await
            .map_err(|_| ProviderError::Timeout)?,
        None => provider.complete(transcript, tools).await,
    }
}
