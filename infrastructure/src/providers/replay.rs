//! Scripted completion provider.
//!
//! A replay script is a JSON array (or an object with a `responses` array).
//! Each entry is either a provider response or a simulated failure:
//!
//! ```json
//! [
//!   {"content": [{"type": "tool_use", "id": "c1", "name": "get_reservations",
//!                 "input": {"date": "15/03/2025"}}]},
//!   {"error": "timeout"},
//!   {"content": [{"type": "text", "text": "45 covers tonight."}]}
//! ]
//! ```
//!
//! Entries are consumed in order, one per `complete` call. Once the script
//! runs out every call fails with [`ProviderError::Exhausted`].

use crate::error::{LoadError, read_json};
use async_trait::async_trait;
use brigade_application::ports::completion_provider::{CompletionProvider, ProviderError};
use brigade_domain::{ContentBlock, LlmResponse, StopReason, Transcript};
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// One scripted answer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ScriptEntry")]
pub enum ReplayEntry {
    /// Simulated provider failure. `timeout`, `connection`, `rate_limited`
    /// and `authentication` map to the matching error; anything else is
    /// reported as `Other`.
    Error { error: String },
    Response(LlmResponse),
}

impl ReplayEntry {
    fn into_result(self) -> Result<LlmResponse, ProviderError> {
        match self {
            ReplayEntry::Response(response) => Ok(response),
            ReplayEntry::Error { error } => Err(match error.as_str() {
                "timeout" => ProviderError::Timeout,
                "connection" => ProviderError::Connection("scripted".to_string()),
                "rate_limited" => ProviderError::RateLimited("scripted".to_string()),
                "authentication" => ProviderError::Authentication("scripted".to_string()),
                _ => ProviderError::Other(error),
            }),
        }
    }
}

// Unknown keys in a script entry are load errors.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptedError {
    error: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptedResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<StopReason>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptEntry {
    Error(ScriptedError),
    Response(ScriptedResponse),
}

impl From<ScriptEntry> for ReplayEntry {
    fn from(entry: ScriptEntry) -> Self {
        match entry {
            ScriptEntry::Error(ScriptedError { error }) => ReplayEntry::Error { error },
            ScriptEntry::Response(r) => ReplayEntry::Response(LlmResponse {
                content: r.content,
                stop_reason: r.stop_reason,
                model: r.model,
            }),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReplayScript {
    List(Vec<ReplayEntry>),
    Wrapped { responses: Vec<ReplayEntry> },
}

/// Provider that plays back a fixed script
pub struct ReplayProvider {
    entries: Mutex<VecDeque<ReplayEntry>>,
    calls: AtomicUsize,
}

impl ReplayProvider {
    pub fn new(entries: Vec<ReplayEntry>) -> Self {
        Self {
            entries: Mutex::new(entries.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Script made only of successful responses
    pub fn from_responses(responses: Vec<LlmResponse>) -> Self {
        Self::new(responses.into_iter().map(ReplayEntry::Response).collect())
    }

    /// Load a script file. An empty script is rejected.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let entries = match read_json::<ReplayScript>(path)? {
            ReplayScript::List(entries) | ReplayScript::Wrapped { responses: entries } => entries,
        };
        if entries.is_empty() {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }
        debug!("Loaded replay script {} ({} entries)", path.display(), entries.len());
        Ok(Self::new(entries))
    }

    /// Calls received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Entries not yet played
    pub fn remaining(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CompletionProvider for ReplayProvider {
    async fn complete(
        &self,
        transcript: &Transcript,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "Replay call {} ({} turns, {} tools)",
            call,
            transcript.len(),
            tools.len()
        );
        let next = self
            .entries
            .lock()
            .map_err(|_| ProviderError::Other("replay script lock poisoned".to_string()))?
            .pop_front();
        next.ok_or(ProviderError::Exhausted)?.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_domain::NextAction;
    use std::fs;

    #[tokio::test]
    async fn test_plays_entries_in_order_then_exhausts() {
        let provider = ReplayProvider::new(vec![
            ReplayEntry::Error {
                error: "timeout".to_string(),
            },
            ReplayEntry::Response(LlmResponse::from_text("Bonsoir.")),
        ]);
        let transcript = Transcript::start("sys", "task");

        assert_eq!(
            provider.complete(&transcript, &[]).await,
            Err(ProviderError::Timeout)
        );
        let response = provider.complete(&transcript, &[]).await.unwrap();
        assert_eq!(response.text_content(), "Bonsoir.");
        assert_eq!(
            provider.complete(&transcript, &[]).await,
            Err(ProviderError::Exhausted)
        );
        assert_eq!(provider.calls(), 3);
        assert_eq!(provider.remaining(), 0);
    }

    #[tokio::test]
    async fn test_from_file_with_tool_use() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        fs::write(
            &path,
            r#"{"responses": [
                {"content": [{"type": "tool_use", "id": "c1", "name": "get_reservations",
                              "input": {"date": "15/03/2025"}}],
                 "stop_reason": "tool_use"},
                {"error": "quota exceeded"}
            ]}"#,
        )
        .unwrap();

        let provider = ReplayProvider::from_file(&path).unwrap();
        assert_eq!(provider.remaining(), 2);

        let transcript = Transcript::start("sys", "task");
        let first = provider.complete(&transcript, &[]).await.unwrap();
        match first.next_action() {
            NextAction::Invoke(turn) => {
                assert_eq!(turn.tool_calls[0].tool_name, "get_reservations");
                assert_eq!(turn.tool_calls[0].get_string("date"), Some("15/03/2025"));
            }
            other => panic!("expected Invoke, got {:?}", other),
        }
        assert_eq!(
            provider.complete(&transcript, &[]).await,
            Err(ProviderError::Other("quota exceeded".to_string()))
        );
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = ReplayProvider::from_file(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(LoadError::Io { .. })));

        let empty = dir.path().join("empty.json");
        fs::write(&empty, "[]").unwrap();
        assert!(matches!(
            ReplayProvider::from_file(&empty),
            Err(LoadError::Empty { .. })
        ));

        let typo = dir.path().join("typo.json");
        fs::write(&typo, r#"[{"contnet": [{"type": "text", "text": "Bonsoir."}]}]"#).unwrap();
        assert!(matches!(
            ReplayProvider::from_file(&typo),
            Err(LoadError::Parse { .. })
        ));

        let extra = dir.path().join("extra.json");
        fs::write(&extra, r#"[{"error": "timeout", "retry": true}]"#).unwrap();
        assert!(matches!(
            ReplayProvider::from_file(&extra),
            Err(LoadError::Parse { .. })
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "[{").unwrap();
        assert!(matches!(
            ReplayProvider::from_file(&broken),
            Err(LoadError::Parse { .. })
        ));
    }
}
