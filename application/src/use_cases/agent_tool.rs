//! Sub-agent exposed as a tool
//!
//! Wraps a [`RunConversationUseCase`] (with its own registry) behind a
//! single-parameter tool so a parent conversation can delegate a task to a
//! specialist and receive its final answer as the tool result.

use crate::ports::progress::NoProgress;
use crate::use_cases::run_conversation::RunConversationUseCase;
use async_trait::async_trait;
use brigade_domain::tool::required_str;
use brigade_domain::{
    LoopOutcome, PromptTemplate, ToolArguments, ToolDefinition, ToolDescriptor, ToolError,
    ToolHandler, ToolParameter,
};
use tracing::debug;

/// A nested conversation loop usable as a tool
#[derive(Clone)]
pub struct AgentTool {
    use_case: RunConversationUseCase,
    max_turns: usize,
}

impl AgentTool {
    pub fn new(use_case: RunConversationUseCase, max_turns: usize) -> Self {
        Self {
            use_case,
            max_turns,
        }
    }

    /// Build a descriptor with one required `task` string parameter.
    pub fn descriptor(self, name: &str, description: &str) -> ToolDescriptor {
        let definition = ToolDefinition::new(name, description).with_parameter(
            ToolParameter::new("task", "The task to delegate to this specialist", true),
        );
        ToolDescriptor::new(
            definition,
            AgentToolHandler {
                agent: self,
                system_prompt: PromptTemplate::specialist_system(name, description),
                name: name.to_string(),
            },
        )
    }
}

struct AgentToolHandler {
    agent: AgentTool,
    system_prompt: String,
    name: String,
}

#[async_trait]
impl ToolHandler for AgentToolHandler {
    async fn call(&self, arguments: ToolArguments) -> Result<String, ToolError> {
        let task = required_str(&arguments, "task")?;
        debug!(agent = %self.name, "Delegating: {}", task);

        let outcome = self
            .agent
            .use_case
            .run(&self.system_prompt, task, self.agent.max_turns, &NoProgress)
            .await
            .map_err(|e| ToolError::execution_failed(format!("agent '{}': {}", self.name, e)))?;

        match outcome {
            LoopOutcome::Completed(answer) => Ok(answer),
            LoopOutcome::Exhausted(_) => Err(ToolError::execution_failed(format!(
                "agent '{}' gave no final answer within {} turn(s)",
                self.name, self.agent.max_turns
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion_provider::{CompletionProvider, ProviderError};
    use crate::ports::tool_schema::ToolSchemaPort;
    use brigade_domain::{
        ERROR_MARKER, LlmResponse, ToolCall, ToolRegistry, Transcript, Turn,
    };
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct MockProvider {
        responses: Mutex<VecDeque<Result<LlmResponse, ProviderError>>>,
        systems: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn new(results: Vec<Result<LlmResponse, ProviderError>>) -> Self {
            Self {
                responses: Mutex::new(results.into_iter().collect()),
                systems: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for MockProvider {
        async fn complete(
            &self,
            transcript: &Transcript,
            _tools: &[serde_json::Value],
        ) -> Result<LlmResponse, ProviderError> {
            if let Some(Turn::System { content }) = transcript.turns().first() {
                self.systems.lock().unwrap().push(content.clone());
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ProviderError::Exhausted))
        }
    }

    struct Schema;

    impl ToolSchemaPort for Schema {
        fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
            serde_json::json!({ "name": tool.name })
        }
    }

    fn sommelier(provider: Arc<MockProvider>, max_turns: usize) -> ToolDescriptor {
        let inner = RunConversationUseCase::new(provider, Arc::new(ToolRegistry::new()), Arc::new(Schema));
        AgentTool::new(inner, max_turns).descriptor("sommelier", "Pairs wines with dishes.")
    }

    fn task_call(id: &str, task: &str) -> ToolCall {
        ToolCall::new(id, "sommelier").with_arg("task", task)
    }

    #[test]
    fn test_descriptor_schema() {
        let provider = Arc::new(MockProvider::new(vec![]));
        let descriptor = sommelier(provider, 3);
        assert_eq!(descriptor.name(), "sommelier");
        assert_eq!(descriptor.definition.required_parameters().count(), 1);
        assert!(descriptor.definition.parameter("task").is_some());
    }

    #[tokio::test]
    async fn test_delegates_to_nested_loop() {
        let inner_provider = Arc::new(MockProvider::new(vec![Ok(LlmResponse::from_text(
            "A Chablis.",
        ))]));
        let registry = ToolRegistry::new()
            .with_tool(sommelier(inner_provider.clone(), 3))
            .unwrap();

        let result = registry.dispatch(&task_call("c1", "Wine for oysters?")).await;
        assert_eq!(result.content(), "A Chablis.");
        assert!(inner_provider.systems.lock().unwrap()[0].contains("sommelier"));
    }

    #[tokio::test]
    async fn test_exhausted_nested_loop_is_error() {
        let inner_provider = Arc::new(MockProvider::new(vec![Ok(LlmResponse::from_text(""))]));
        let registry = ToolRegistry::new()
            .with_tool(sommelier(inner_provider, 1))
            .unwrap();

        let result = registry.dispatch(&task_call("c1", "Wine?")).await;
        assert!(result.content().starts_with(ERROR_MARKER));
        assert!(result.content().contains("no final answer"));
    }

    #[tokio::test]
    async fn test_provider_error_is_handler_error() {
        let inner_provider = Arc::new(MockProvider::new(vec![Err(ProviderError::Connection(
            "down".to_string(),
        ))]));
        let registry = ToolRegistry::new()
            .with_tool(sommelier(inner_provider, 2))
            .unwrap();

        let result = registry.dispatch(&task_call("c1", "Wine?")).await;
        assert!(result.is_error());
        assert_eq!(result.error.as_ref().unwrap().code, "EXECUTION_FAILED");
    }

    #[tokio::test]
    async fn test_missing_task_rejected_before_handler() {
        let registry = ToolRegistry::new()
            .with_tool(sommelier(Arc::new(MockProvider::new(vec![])), 2))
            .unwrap();
        let result = registry.dispatch(&ToolCall::new("c1", "sommelier")).await;
        assert_eq!(result.error.as_ref().unwrap().code, "INVALID_ARGUMENT");
    }
}
