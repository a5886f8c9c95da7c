//! Conversation transcript
//!
//! An append-only sequence of [`Turn`]s shared between the loop and the
//! provider. The transcript enforces that every tool turn answers an
//! invocation requested by an earlier assistant turn, exactly once.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Format version of [`AssistantTurn`], recorded alongside logged turns.
pub const ASSISTANT_TURN_VERSION: u32 = 1;

/// Assistant turn as it enters the transcript.
///
/// Only the conversational fields are kept. Stop reasons, model ids and any
/// other provider-internal data are dropped when the turn is built from a
/// provider response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssistantTurn {
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl AssistantTurn {
    pub fn new(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// One entry of the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Turn {
    System { content: String },
    User { content: String },
    Assistant(AssistantTurn),
    Tool { invocation_id: String, content: String },
}

impl Turn {
    pub fn role(&self) -> &'static str {
        match self {
            Turn::System { .. } => "system",
            Turn::User { .. } => "user",
            Turn::Assistant(_) => "assistant",
            Turn::Tool { .. } => "tool",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Turn::System { content } | Turn::User { content } | Turn::Tool { content, .. } => {
                content
            }
            Turn::Assistant(turn) => &turn.content,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Tool result references unknown invocation id '{0}'")]
    UnknownInvocation(String),

    #[error("Invocation id '{0}' already has a tool result")]
    DuplicateResult(String),

    #[error("Invocation id '{0}' is already used in this transcript")]
    DuplicateInvocation(String),
}

/// Ordered, append-only conversation history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Turn>", into = "Vec<Turn>")]
pub struct Transcript {
    turns: Vec<Turn>,
    requested: HashSet<String>,
    answered: HashSet<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript seeded with a system turn and a user turn
    pub fn start(system_prompt: impl Into<String>, user_task: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.push_system(system_prompt);
        transcript.push_user(user_task);
        transcript
    }

    pub fn push_system(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::System {
            content: content.into(),
        });
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::User {
            content: content.into(),
        });
    }

    /// Append an assistant turn. Each invocation id must be new to the transcript.
    pub fn push_assistant(&mut self, turn: AssistantTurn) -> Result<(), TranscriptError> {
        let mut seen = HashSet::new();
        for call in &turn.tool_calls {
            if self.requested.contains(&call.id) || !seen.insert(call.id.as_str()) {
                return Err(TranscriptError::DuplicateInvocation(call.id.clone()));
            }
        }
        self.requested
            .extend(turn.tool_calls.iter().map(|c| c.id.clone()));
        self.turns.push(Turn::Assistant(turn));
        Ok(())
    }

    /// Rewrite invocation ids in `turn` that collide with ids already in the
    /// transcript or earlier in the same turn. Returns `(from, to)` pairs.
    pub fn dedupe_invocation_ids(&self, turn: &mut AssistantTurn) -> Vec<(String, String)> {
        let mut taken: HashSet<String> = HashSet::new();
        let mut renamed = Vec::new();
        for call in &mut turn.tool_calls {
            if self.requested.contains(&call.id) || taken.contains(&call.id) {
                let fresh = (1..)
                    .map(|n| format!("{}#{}", call.id, n))
                    .find(|c| !self.requested.contains(c) && !taken.contains(c))
                    .unwrap_or_default();
                renamed.push((std::mem::replace(&mut call.id, fresh), call.id.clone()));
            }
            taken.insert(call.id.clone());
        }
        renamed
    }

    /// Append a tool result for a previously requested invocation.
    pub fn push_tool_result(
        &mut self,
        invocation_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), TranscriptError> {
        let invocation_id = invocation_id.into();
        if !self.requested.contains(&invocation_id) {
            return Err(TranscriptError::UnknownInvocation(invocation_id));
        }
        if self.answered.contains(&invocation_id) {
            return Err(TranscriptError::DuplicateResult(invocation_id));
        }
        self.answered.insert(invocation_id.clone());
        self.turns.push(Turn::Tool {
            invocation_id,
            content: content.into(),
        });
        Ok(())
    }

    /// Rebuild a transcript from raw turns, checking every invariant.
    pub fn from_turns(turns: Vec<Turn>) -> Result<Self, TranscriptError> {
        let mut transcript = Self::new();
        for turn in turns {
            transcript.push(turn)?;
        }
        Ok(transcript)
    }

    pub fn push(&mut self, turn: Turn) -> Result<(), TranscriptError> {
        match turn {
            Turn::System { content } => self.push_system(content),
            Turn::User { content } => self.push_user(content),
            Turn::Assistant(turn) => self.push_assistant(turn)?,
            Turn::Tool {
                invocation_id,
                content,
            } => self.push_tool_result(invocation_id, content)?,
        }
        Ok(())
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Content of the most recent non-empty assistant turn
    pub fn last_assistant_content(&self) -> Option<&str> {
        self.turns.iter().rev().find_map(|t| match t {
            Turn::Assistant(a) if !a.content.is_empty() => Some(a.content.as_str()),
            _ => None,
        })
    }

    /// Invocation ids requested but not yet answered
    pub fn pending_invocations(&self) -> Vec<&str> {
        self.turns
            .iter()
            .filter_map(|t| match t {
                Turn::Assistant(a) => Some(a.tool_calls.iter()),
                _ => None,
            })
            .flatten()
            .map(|c| c.id.as_str())
            .filter(|id| !self.answered.contains(*id))
            .collect()
    }

    pub fn tool_result_count(&self) -> usize {
        self.answered.len()
    }
}

impl TryFrom<Vec<Turn>> for Transcript {
    type Error = TranscriptError;

    fn try_from(turns: Vec<Turn>) -> Result<Self, Self::Error> {
        Self::from_turns(turns)
    }
}

impl From<Transcript> for Vec<Turn> {
    fn from(transcript: Transcript) -> Self {
        transcript.turns
    }
}
