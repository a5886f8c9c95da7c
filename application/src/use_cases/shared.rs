//! Shared helpers for use cases.
//!
//! Single-shot, tool-less provider calls used by the structured-output
//! wrapper and the plan-and-execute pipeline.

use crate::ports::completion_provider::{CompletionProvider, ProviderError, complete_with_timeout};
use brigade_domain::Transcript;
use std::time::Duration;

/// Ask the provider once with a system + user transcript and no tools.
///
/// Returns the concatenated text of the response, which may be empty.
pub(crate) async fn complete_text(
    provider: &dyn CompletionProvider,
    system_prompt: &str,
    user_message: &str,
    timeout: Option<Duration>,
) -> Result<String, ProviderError> {
    let transcript = Transcript::start(system_prompt, user_message);
    let response = complete_with_timeout(provider, &transcript, &[], timeout).await?;
    Ok(response.text_content())
}
