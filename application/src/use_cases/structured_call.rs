//! Structured-output retry wrapper.
//!
//! Sends the same prompt up to `max_attempts` times until the caller's parse
//! function accepts the response text. Parse failures are recorded and
//! retried; provider errors are not.

use crate::ports::completion_provider::{CompletionProvider, ProviderError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::shared::complete_text;
use brigade_domain::ParseError;
use brigade_domain::core::string::preview;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// System and user text sent on every attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub system: String,
    pub user: String,
}

impl PromptSpec {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// A parsed value together with the failures absorbed on the way
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredOutput<T> {
    pub value: T,
    pub failures: Vec<ParseError>,
    /// Provider calls made, including the successful one
    pub attempts: usize,
}

/// Every attempt failed to parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no valid output after {attempts} attempt(s): {last_error}")]
pub struct StructuredOutputError {
    pub last_error: ParseError,
    pub attempts: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructuredCallError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Exhausted(#[from] StructuredOutputError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Use case wrapping a single prompt with parse-and-retry
#[derive(Clone)]
pub struct StructuredCallUseCase {
    provider: Arc<dyn CompletionProvider>,
    conversation_logger: Arc<dyn ConversationLogger>,
    provider_timeout: Option<Duration>,
}

impl StructuredCallUseCase {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            conversation_logger: Arc::new(NoConversationLogger),
            provider_timeout: None,
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Call the provider until `parse` succeeds or `max_attempts` is spent.
    ///
    /// A provider timeout counts as a failed attempt. Any other provider
    /// error is returned immediately.
    pub async fn call<T, F>(
        &self,
        prompt: &PromptSpec,
        parse: F,
        max_attempts: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<StructuredOutput<T>, StructuredCallError>
    where
        F: Fn(&str) -> Result<T, ParseError>,
    {
        if max_attempts == 0 {
            return Err(StructuredCallError::InvalidRequest(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        let mut failures: Vec<ParseError> = Vec::new();

        for attempt in 1..=max_attempts {
            debug!("Structured call attempt {}/{}", attempt, max_attempts);

            let outcome = match complete_text(
                self.provider.as_ref(),
                &prompt.system,
                &prompt.user,
                self.provider_timeout,
            )
            .await
            {
                Ok(text) => parse(&text).map_err(|e| (e, text)),
                Err(ProviderError::Timeout) => Err((
                    ParseError::new("provider call timed out"),
                    String::new(),
                )),
                Err(e) => return Err(e.into()),
            };

            match outcome {
                Ok(value) => {
                    return Ok(StructuredOutput {
                        value,
                        failures,
                        attempts: attempt,
                    });
                }
                Err((error, raw)) => {
                    warn!(
                        "Structured output rejected (attempt {}/{}): {}",
                        attempt, max_attempts, error
                    );
                    self.conversation_logger.log(ConversationEvent::new(
                        "structured_retry",
                        serde_json::json!({
                            "attempt": attempt,
                            "max_attempts": max_attempts,
                            "error": error.to_string(),
                            "response_preview": preview(&raw, 200),
                        }),
                    ));
                    progress.on_structured_retry(attempt, max_attempts, &error.message);
                    failures.push(error);
                }
            }
        }

        let last_error = failures
            .pop()
            .unwrap_or_else(|| ParseError::new("no attempts made"));
        Err(StructuredOutputError {
            last_error,
            attempts: max_attempts,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use brigade_domain::{LlmResponse, Transcript};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockProvider {
        responses: Mutex<VecDeque<Result<LlmResponse, ProviderError>>>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<Transcript>>,
    }

    impl MockProvider {
        fn new(results: Vec<Result<LlmResponse, ProviderError>>) -> Self {
            Self {
                responses: Mutex::new(results.into_iter().collect()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn texts(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(LlmResponse::from_text(*t))).collect())
        }
    }

    #[async_trait]
    impl CompletionProvider for MockProvider {
        async fn complete(
            &self,
            transcript: &Transcript,
            _tools: &[serde_json::Value],
        ) -> Result<LlmResponse, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(transcript.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ProviderError::Exhausted))
        }
    }

    #[derive(Default)]
    struct RetryCounter(AtomicUsize);

    impl ProgressNotifier for RetryCounter {
        fn on_structured_retry(&self, _attempt: usize, _max: usize, _error: &str) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn parse_number(text: &str) -> Result<i64, ParseError> {
        text.trim()
            .parse::<i64>()
            .map_err(|_| ParseError::new(format!("not a number: {}", text)))
    }

    fn prompt() -> PromptSpec {
        PromptSpec::new("Answer with a number.", "How many covers tonight?")
    }

    #[tokio::test]
    async fn test_fail_fail_succeed() {
        let provider = Arc::new(MockProvider::texts(&["many", "lots", "45"]));
        let progress = RetryCounter::default();
        let output = StructuredCallUseCase::new(provider.clone())
            .call(&prompt(), parse_number, 3, &progress)
            .await
            .unwrap();

        assert_eq!(output.value, 45);
        assert_eq!(output.attempts, 3);
        assert_eq!(output.failures.len(), 2);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
        assert_eq!(progress.0.load(Ordering::SeqCst), 2);

        // Every attempt sends the identical prompt
        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn test_exhausted_after_max_attempts() {
        let provider = Arc::new(MockProvider::texts(&["many", "lots", "45"]));
        let err = StructuredCallUseCase::new(provider.clone())
            .call(&prompt(), parse_number, 2, &NoProgress)
            .await
            .unwrap_err();

        match err {
            StructuredCallError::Exhausted(e) => {
                assert_eq!(e.attempts, 2);
                assert_eq!(e.last_error.message, "not a number: lots");
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_provider_error_not_retried() {
        let provider = Arc::new(MockProvider::new(vec![
            Err(ProviderError::RateLimited("slow down".to_string())),
            Ok(LlmResponse::from_text("45")),
        ]));
        let err = StructuredCallUseCase::new(provider.clone())
            .call(&prompt(), parse_number, 3, &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StructuredCallError::Provider(ProviderError::RateLimited(_))
        ));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_counts_as_attempt() {
        let provider = Arc::new(MockProvider::new(vec![
            Err(ProviderError::Timeout),
            Ok(LlmResponse::from_text("12")),
        ]));
        let output = StructuredCallUseCase::new(provider)
            .call(&prompt(), parse_number, 2, &NoProgress)
            .await
            .unwrap();
        assert_eq!(output.value, 12);
        assert_eq!(output.failures[0].message, "provider call timed out");
    }

    #[tokio::test]
    async fn test_zero_attempts_is_invalid() {
        let provider = Arc::new(MockProvider::texts(&["45"]));
        let err = StructuredCallUseCase::new(provider.clone())
            .call(&prompt(), parse_number, 0, &NoProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, StructuredCallError::InvalidRequest(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
