//! Domain layer for brigade
//!
//! This crate contains the pure types of a tool-augmented conversation loop.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! A [`ToolDescriptor`] pairs a schema ([`ToolDefinition`]) with a handler.
//! The [`ToolRegistry`] validates and coerces arguments, runs handlers, and
//! turns every failure into text carrying [`ERROR_MARKER`].
//!
//! ## Transcript
//!
//! A [`Transcript`] is the append-only history exchanged with the provider.
//! Each tool turn answers exactly one earlier invocation request. A run ends
//! in a [`LoopOutcome`]: `Completed` with the final text, or `Exhausted` with
//! the transcript when the turn budget ran out.
//!
//! ## Plans and evaluation
//!
//! [`Plan`]s drive the plan-and-execute pipeline; [`DatasetItem`]s and
//! [`Score`]s drive experiments.

pub mod agent;
pub mod config;
pub mod conversation;
pub mod core;
pub mod evaluation;
pub mod prompt;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use agent::{Plan, PlanRunResult, StepResult, parse_plan, parse_plan_json};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use conversation::{
    ASSISTANT_TURN_VERSION, AssistantTurn, LoopOutcome, Transcript, TranscriptError, Turn,
};
pub use crate::core::error::ParseError;
pub use evaluation::{
    DEFAULT_JUDGE_CRITERIA, DatasetItem, ExperimentReport, ItemReport, Score, parse_judge_scores,
    rule_scores,
};
pub use prompt::PromptTemplate;
pub use session::{ContentBlock, LlmResponse, NextAction, StopReason};
pub use tool::{
    ERROR_MARKER, ParamType, RegistryError, ToolArguments, ToolCall, ToolDefinition,
    ToolDescriptor, ToolError, ToolHandler, ToolParameter, ToolRegistry, ToolResult,
};
