//! Provider response types.
//!
//! A completion provider answers with an [`LlmResponse`]: an ordered list of
//! content blocks mixing text and tool-use requests, plus provider metadata.
//! The conversation loop never stores the response itself. It reads it
//! through [`LlmResponse::next_action`], which yields either a final answer,
//! a sanitized [`AssistantTurn`], or a no-progress marker.

use crate::conversation::transcript::AssistantTurn;
use crate::tool::entities::{ToolArguments, ToolCall};
use serde::{Deserialize, Serialize};

/// A single block of content within a provider response.
///
/// # Examples
///
/// ```
/// use brigade_domain::session::response::ContentBlock;
///
/// let text = ContentBlock::text("Let me check the reservations.");
/// assert!(text.as_text().is_some());
///
/// let tool = ContentBlock::ToolUse {
///     id: "call_1".to_string(),
///     name: "get_reservations".to_string(),
///     input: [("date".to_string(), serde_json::json!("15/03/2025"))]
///         .into_iter().collect(),
/// };
/// assert!(tool.as_tool_use().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Text produced by the model.
    Text { text: String },

    /// A tool invocation request.
    ToolUse {
        /// Provider-assigned id correlating the request with its result.
        id: String,
        /// Requested tool identifier (not guaranteed to be registered).
        name: String,
        /// Raw arguments, validated later by the registry.
        #[serde(default)]
        input: ToolArguments,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Returns `(id, name, input)` if this is a `ToolUse` block.
    pub fn as_tool_use(&self) -> Option<(&str, &str, &ToolArguments)> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some((id, name, input)),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// The model wants tools executed.
    ToolUse,
    /// Hit the token limit; the response may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

/// How the loop should proceed after a provider response
#[derive(Debug, Clone, PartialEq)]
pub enum NextAction {
    /// No tool requests and non-empty text: the run is complete.
    Final(String),
    /// Tool requests to execute; the turn is already sanitized.
    Invoke(AssistantTurn),
    /// Neither text nor tool requests. Consumes a turn and changes nothing.
    NoProgress,
}

/// A structured response from a completion provider.
///
/// # Examples
///
/// ```
/// use brigade_domain::session::response::{LlmResponse, NextAction};
///
/// let response = LlmResponse::from_text("Serve the leek tart.");
/// assert_eq!(response.text_content(), "Serve the leek tart.");
/// assert!(matches!(response.next_action(), NextAction::Final(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Content blocks in the response (text and/or tool use).
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
    /// Model identifier (if returned by the provider).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl LlmResponse {
    /// Create a text-only response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Create a response requesting the given tool calls.
    pub fn from_tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            content: calls
                .into_iter()
                .map(|c| ContentBlock::ToolUse {
                    id: c.id,
                    name: c.tool_name,
                    input: c.arguments,
                })
                .collect(),
            stop_reason: Some(StopReason::ToolUse),
            model: None,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract all `ToolUse` content blocks as `Vec<ToolCall>`, in order.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => Some(ToolCall {
                    id: id.clone(),
                    tool_name: name.clone(),
                    arguments: input.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if the response contains any tool use requests.
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }

    /// Classify the response for the conversation loop.
    ///
    /// Text that is only whitespace counts as empty.
    pub fn next_action(&self) -> NextAction {
        let text = self.text_content();
        let calls = self.tool_calls();
        if !calls.is_empty() {
            NextAction::Invoke(AssistantTurn::new(text, calls))
        } else if text.trim().is_empty() {
            NextAction::NoProgress
        } else {
            NextAction::Final(text)
        }
    }
}
