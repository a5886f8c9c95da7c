//! Application layer for brigade
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    completion_provider::{CompletionProvider, ProviderError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, ProgressNotifier},
    tool_schema::ToolSchemaPort,
};
pub use use_cases::agent_tool::AgentTool;
pub use use_cases::plan_and_execute::{PlanAndExecuteError, PlanAndExecuteUseCase};
pub use use_cases::run_conversation::{RunConversationError, RunConversationUseCase};
pub use use_cases::run_experiment::{
    ConversationTask, EvaluationError, Evaluator, ExperimentTask, JudgeEvaluator, PlanTask,
    RuleEvaluator, RunExperimentUseCase,
};
pub use use_cases::structured_call::{
    PromptSpec, StructuredCallError, StructuredCallUseCase, StructuredOutput,
    StructuredOutputError,
};
