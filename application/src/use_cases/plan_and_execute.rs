//! Plan-and-execute use case
//!
//! Three stages, each depending on the one before:
//!
//! 1. **Plan**: a structured call whose reply must parse as a step list.
//! 2. **Execute**: one provider call per step, each seeing earlier outputs.
//! 3. **Synthesize**: one provider call combining every step output.

use crate::config::ExecutionParams;
use crate::ports::completion_provider::{CompletionProvider, ProviderError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::shared::complete_text;
use crate::use_cases::structured_call::{PromptSpec, StructuredCallError, StructuredCallUseCase};
use brigade_domain::{PlanRunResult, PromptTemplate, StepResult, parse_plan};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanAndExecuteError {
    #[error("Planning failed: {0}")]
    Planning(#[from] StructuredCallError),

    #[error("Step {index} failed: {source}")]
    Step {
        index: usize,
        #[source]
        source: ProviderError,
    },

    #[error("Synthesis failed: {0}")]
    Synthesis(ProviderError),
}

/// Use case for the plan → steps → synthesis pipeline
pub struct PlanAndExecuteUseCase {
    provider: Arc<dyn CompletionProvider>,
    conversation_logger: Arc<dyn ConversationLogger>,
    params: ExecutionParams,
}

impl PlanAndExecuteUseCase {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            conversation_logger: Arc::new(NoConversationLogger),
            params: ExecutionParams::default(),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub async fn execute(
        &self,
        request: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<PlanRunResult, PlanAndExecuteError> {
        info!("Planning: {}", request);

        let planner = StructuredCallUseCase::new(self.provider.clone())
            .with_conversation_logger(self.conversation_logger.clone())
            .with_provider_timeout(self.params.provider_timeout);
        let prompt = PromptSpec::new(
            PromptTemplate::planner_system(),
            PromptTemplate::planner_user(request),
        );
        let planned = planner
            .call(&prompt, parse_plan, self.params.max_attempts, progress)
            .await?;
        let plan = planned.value;

        info!("Plan ready with {} step(s)", plan.len());
        progress.on_plan_ready(plan.steps());
        self.conversation_logger.log(ConversationEvent::new(
            "plan_ready",
            serde_json::json!({ "steps": plan.steps() }),
        ));

        let mut step_results: Vec<StepResult> = Vec::with_capacity(plan.len());
        for (index, step) in plan.steps().iter().enumerate() {
            progress.on_step_start(index, step);
            let output = complete_text(
                self.provider.as_ref(),
                PromptTemplate::step_system(),
                &PromptTemplate::step_user(step, &step_results),
                self.params.provider_timeout,
            )
            .await
            .map_err(|source| PlanAndExecuteError::Step { index, source })?;

            self.conversation_logger.log(ConversationEvent::new(
                "step_completed",
                serde_json::json!({ "index": index, "step": step, "output": output }),
            ));
            step_results.push(StepResult {
                step_index: index,
                step: step.clone(),
                output,
            });
        }

        let final_answer = complete_text(
            self.provider.as_ref(),
            PromptTemplate::synthesis_system(),
            &PromptTemplate::synthesis_user(request, &step_results),
            self.params.provider_timeout,
        )
        .await
        .map_err(PlanAndExecuteError::Synthesis)?;

        Ok(PlanRunResult {
            request: request.to_string(),
            plan,
            step_results,
            final_answer,
            plan_retries: planned.failures.iter().map(|e| e.to_string()).collect(),
        })
    }
}
