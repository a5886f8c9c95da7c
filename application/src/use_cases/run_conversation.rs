//! Run Conversation use case.
//!
//! The bounded tool-calling loop: ask the provider for its next action, run
//! the tools it requests through the [`ToolRegistry`], feed the results back,
//! and stop on a final answer or when the turn budget is spent.
//!
//! ```text
//! ┌────────────┐  transcript + tools  ┌──────────┐
//! │ Transcript │─────────────────────▶│ Provider │
//! └─────▲──────┘                      └────┬─────┘
//!       │ tool turns                       │ Final / Invoke / NoProgress
//!       │          ┌──────────────┐        │
//!       └──────────│ ToolRegistry │◀───────┘
//!                  └──────────────┘
//! ```
//!
//! Tool failures of any kind (unknown tool, bad arguments, handler error,
//! timeout) become error-marked tool turns and the loop keeps going. Only a
//! non-timeout provider error ends the run early.

use crate::config::ExecutionParams;
use crate::ports::completion_provider::{CompletionProvider, ProviderError, complete_with_timeout};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::ProgressNotifier;
use crate::ports::tool_schema::ToolSchemaPort;
use brigade_domain::core::string::preview;
use brigade_domain::{
    ASSISTANT_TURN_VERSION, AssistantTurn, LoopOutcome, NextAction, ToolCall, ToolError,
    ToolRegistry, ToolResult, Transcript, TranscriptError,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a conversation run early.
///
/// Running out of turns is not an error; it is [`LoopOutcome::Exhausted`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunConversationError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),
}

/// Use case for running the tool-calling conversation loop.
pub struct RunConversationUseCase {
    provider: Arc<dyn CompletionProvider>,
    registry: Arc<ToolRegistry>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    conversation_logger: Arc<dyn ConversationLogger>,
    params: ExecutionParams,
}

impl Clone for RunConversationUseCase {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            registry: self.registry.clone(),
            tool_schema: self.tool_schema.clone(),
            conversation_logger: self.conversation_logger.clone(),
            params: self.params.clone(),
        }
    }
}

impl RunConversationUseCase {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        registry: Arc<ToolRegistry>,
        tool_schema: Arc<dyn ToolSchemaPort>,
    ) -> Self {
        Self {
            provider,
            registry,
            tool_schema,
            conversation_logger: Arc::new(NoConversationLogger),
            params: ExecutionParams::default(),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Use these timeouts (the turn budget is passed per run).
    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Start a new conversation from a system prompt and a user task.
    pub async fn run(
        &self,
        system_prompt: &str,
        user_task: &str,
        max_turns: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<LoopOutcome, RunConversationError> {
        info!("Starting conversation: {}", preview(user_task, 100));
        let mut transcript = Transcript::start(system_prompt, user_task);
        self.drive(&mut transcript, max_turns, progress).await
    }

    /// Continue an existing transcript, e.g. one carrying earlier exchanges.
    pub async fn run_with_transcript(
        &self,
        mut transcript: Transcript,
        max_turns: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<LoopOutcome, RunConversationError> {
        self.drive(&mut transcript, max_turns, progress).await
    }

    /// Append a user message to `transcript` and run until it is answered.
    ///
    /// On `Completed`, the final answer is also appended as an assistant turn
    /// so the next follow-up sees the whole exchange.
    pub async fn follow_up(
        &self,
        transcript: &mut Transcript,
        user_message: &str,
        max_turns: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<LoopOutcome, RunConversationError> {
        transcript.push_user(user_message);
        self.drive(transcript, max_turns, progress).await
    }

    async fn drive(
        &self,
        transcript: &mut Transcript,
        max_turns: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<LoopOutcome, RunConversationError> {
        let tools = self.tool_schema.registry_schema(&self.registry);

        self.conversation_logger.log(ConversationEvent::new(
            "run_started",
            serde_json::json!({
                "max_turns": max_turns,
                "transcript_turns": transcript.len(),
                "tools": self.registry.names(),
            }),
        ));

        for turn in 1..=max_turns {
            progress.on_turn_start(turn, max_turns);

            let response = match complete_with_timeout(
                self.provider.as_ref(),
                transcript,
                &tools,
                self.params.provider_timeout,
            )
            .await
            {
                Ok(response) => response,
                Err(ProviderError::Timeout) => {
                    warn!("Provider timed out on turn {}/{}", turn, max_turns);
                    self.conversation_logger.log(ConversationEvent::new(
                        "provider_timeout",
                        serde_json::json!({ "turn": turn }),
                    ));
                    progress.on_no_progress(turn, "provider timeout");
                    continue;
                }
                Err(e) => {
                    warn!("Provider error on turn {}: {}", turn, e);
                    return Err(e.into());
                }
            };

            match response.next_action() {
                NextAction::Final(answer) => {
                    info!("Conversation completed in {} turn(s)", turn);
                    transcript.push_assistant(AssistantTurn::new(answer.clone(), vec![]))?;
                    self.conversation_logger.log(ConversationEvent::new(
                        "run_completed",
                        serde_json::json!({
                            "turns": turn,
                            "bytes": answer.len(),
                            "text": answer,
                        }),
                    ));
                    return Ok(LoopOutcome::Completed(answer));
                }
                NextAction::NoProgress => {
                    debug!("Turn {} produced neither text nor tool calls", turn);
                    progress.on_no_progress(turn, "empty response");
                }
                NextAction::Invoke(assistant) => {
                    self.execute_turn(transcript, assistant, turn, progress)
                        .await?;
                }
            }
        }

        info!("Conversation exhausted after {} turn(s)", max_turns);
        self.conversation_logger.log(ConversationEvent::new(
            "run_exhausted",
            serde_json::json!({
                "max_turns": max_turns,
                "transcript_turns": transcript.len(),
            }),
        ));
        Ok(LoopOutcome::Exhausted(transcript.clone()))
    }

    /// Record the assistant turn, then run its tool calls one by one, in order.
    async fn execute_turn(
        &self,
        transcript: &mut Transcript,
        assistant: AssistantTurn,
        turn: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), RunConversationError> {
        if !assistant.content.is_empty() {
            progress.on_assistant_text(&assistant.content);
        }
        let mut assistant = assistant;
        let renamed = transcript.dedupe_invocation_ids(&mut assistant);
        for (from, to) in &renamed {
            warn!("Turn {}: invocation id '{}' reused, renamed to '{}'", turn, from, to);
        }
        self.conversation_logger.log(ConversationEvent::new(
            "assistant_turn",
            serde_json::json!({
                "version": ASSISTANT_TURN_VERSION,
                "turn": turn,
                "assistant": serde_json::to_value(&assistant).unwrap_or_default(),
                "renamed_ids": renamed
                    .iter()
                    .map(|(from, to)| serde_json::json!({ "from": from, "to": to }))
                    .collect::<Vec<_>>(),
            }),
        ));

        let calls = assistant.tool_calls.clone();
        transcript.push_assistant(assistant)?;

        debug!("Turn {}: executing {} tool call(s)", turn, calls.len());
        for call in &calls {
            progress.on_tool_call(call);
            let result = self.dispatch(call).await;
            let content = result.content();

            if result.is_error() {
                warn!(tool = %call.tool_name, "Tool call failed: {}", preview(&content, 200));
            } else {
                debug!(tool = %call.tool_name, "Tool call succeeded");
            }
            self.conversation_logger.log(ConversationEvent::new(
                "tool_call",
                serde_json::json!({
                    "turn": turn,
                    "id": call.id,
                    "tool": call.tool_name,
                    "arguments": call.arguments,
                    "is_error": result.is_error(),
                    "content": content,
                }),
            ));
            progress.on_tool_result(&result);

            transcript.push_tool_result(&call.id, content)?;
        }
        Ok(())
    }

    async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        match self.params.tool_timeout {
            Some(limit) => tokio::time::timeout(limit, self.registry.dispatch(call))
                .await
                .unwrap_or_else(|_| {
                    ToolResult::failure(&call.id, &call.tool_name, ToolError::timeout(&call.tool_name))
                }),
            None => self.registry.dispatch(call).await,
        }
    }
}
