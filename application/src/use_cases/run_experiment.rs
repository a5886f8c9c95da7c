//! Run Experiment use case
//!
//! Runs a task over every dataset item, scores each output with a set of
//! evaluators, and aggregates the scores into an [`ExperimentReport`].
//!
//! A failing task or evaluator is recorded on its item; it never aborts the
//! experiment.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::plan_and_execute::PlanAndExecuteUseCase;
use crate::use_cases::run_conversation::RunConversationUseCase;
use crate::use_cases::structured_call::{PromptSpec, StructuredCallError, StructuredCallUseCase};
use async_trait::async_trait;
use brigade_domain::{
    DEFAULT_JUDGE_CRITERIA, DatasetItem, ExperimentReport, ItemReport, LoopOutcome,
    PromptTemplate, Score, parse_judge_scores, rule_scores,
};
use futures::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Task failed: {0}")]
    Task(String),

    #[error("Judge failed: {0}")]
    Judge(#[from] StructuredCallError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// The system under test: turns one dataset item into an output
#[async_trait]
pub trait ExperimentTask: Send + Sync {
    async fn run(&self, item: &DatasetItem) -> Result<String, EvaluationError>;
}

/// Scores one task output
#[async_trait]
pub trait Evaluator: Send + Sync {
    fn name(&self) -> &str;

    async fn evaluate(
        &self,
        item: &DatasetItem,
        output: &str,
    ) -> Result<Vec<Score>, EvaluationError>;
}

/// Deterministic checks against `expected_output.must_avoid` / `must_include`
pub struct RuleEvaluator;

#[async_trait]
impl Evaluator for RuleEvaluator {
    fn name(&self) -> &str {
        "rules"
    }

    async fn evaluate(
        &self,
        item: &DatasetItem,
        output: &str,
    ) -> Result<Vec<Score>, EvaluationError> {
        Ok(rule_scores(output, &item.expected_output))
    }
}

/// Model-graded scoring through a structured call
pub struct JudgeEvaluator {
    structured: StructuredCallUseCase,
    criteria: Vec<String>,
    max_attempts: usize,
}

impl JudgeEvaluator {
    pub fn new(structured: StructuredCallUseCase, max_attempts: usize) -> Self {
        Self {
            structured,
            criteria: DEFAULT_JUDGE_CRITERIA.iter().map(|c| c.to_string()).collect(),
            max_attempts,
        }
    }

    pub fn with_criteria(mut self, criteria: Vec<String>) -> Self {
        self.criteria = criteria;
        self
    }
}

#[async_trait]
impl Evaluator for JudgeEvaluator {
    fn name(&self) -> &str {
        "judge"
    }

    async fn evaluate(
        &self,
        item: &DatasetItem,
        output: &str,
    ) -> Result<Vec<Score>, EvaluationError> {
        let prompt = PromptSpec::new(
            PromptTemplate::judge_system(&self.criteria),
            PromptTemplate::judge_user(&item.input_text(), output, &item.expected_output),
        );
        let criteria = &self.criteria;
        let scored = self
            .structured
            .call(
                &prompt,
                |text| parse_judge_scores(text, criteria),
                self.max_attempts,
                &NoProgress,
            )
            .await?;
        Ok(scored.value)
    }
}

/// Task that answers each item with a tool-calling conversation
pub struct ConversationTask {
    use_case: RunConversationUseCase,
    system_prompt: String,
    max_turns: usize,
}

impl ConversationTask {
    pub fn new(
        use_case: RunConversationUseCase,
        system_prompt: impl Into<String>,
        max_turns: usize,
    ) -> Self {
        Self {
            use_case,
            system_prompt: system_prompt.into(),
            max_turns,
        }
    }
}

#[async_trait]
impl ExperimentTask for ConversationTask {
    async fn run(&self, item: &DatasetItem) -> Result<String, EvaluationError> {
        let outcome = self
            .use_case
            .run(
                &self.system_prompt,
                &item.input_text(),
                self.max_turns,
                &NoProgress,
            )
            .await
            .map_err(|e| EvaluationError::Task(e.to_string()))?;
        match outcome {
            LoopOutcome::Completed(answer) => Ok(answer),
            LoopOutcome::Exhausted(_) => Err(EvaluationError::Task(format!(
                "no final answer within {} turn(s)",
                self.max_turns
            ))),
        }
    }
}

/// Task that answers each item with the plan-and-execute pipeline
pub struct PlanTask {
    use_case: PlanAndExecuteUseCase,
}

impl PlanTask {
    pub fn new(use_case: PlanAndExecuteUseCase) -> Self {
        Self { use_case }
    }
}

#[async_trait]
impl ExperimentTask for PlanTask {
    async fn run(&self, item: &DatasetItem) -> Result<String, EvaluationError> {
        self.use_case
            .execute(&item.input_text(), &NoProgress)
            .await
            .map(|result| result.final_answer)
            .map_err(|e| EvaluationError::Task(e.to_string()))
    }
}

/// Use case for running an experiment over a dataset
pub struct RunExperimentUseCase {
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Default for RunExperimentUseCase {
    fn default() -> Self {
        Self::new()
    }
}

impl RunExperimentUseCase {
    pub fn new() -> Self {
        Self {
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Run `task` once per item with up to `concurrency` items in flight.
    ///
    /// Item reports keep dataset order regardless of completion order.
    pub async fn run(
        &self,
        name: &str,
        items: Vec<DatasetItem>,
        task: &dyn ExperimentTask,
        evaluators: &[Arc<dyn Evaluator>],
        concurrency: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<ExperimentReport, EvaluationError> {
        if concurrency == 0 {
            return Err(EvaluationError::InvalidRequest(
                "concurrency must be at least 1".to_string(),
            ));
        }

        info!(
            "Running experiment '{}' on {} item(s), concurrency {}",
            name,
            items.len(),
            concurrency
        );
        progress.on_experiment_start(name, items.len());

        let reports: Vec<ItemReport> = futures::stream::iter(items.iter())
            .map(|item| async move {
                let report = self.run_item(item, task, evaluators).await;
                progress.on_item_complete(&report);
                report
            })
            .buffered(concurrency)
            .collect()
            .await;

        let report = ExperimentReport::new(name, reports);
        self.conversation_logger.log(ConversationEvent::new(
            "experiment_completed",
            serde_json::json!({
                "name": report.name,
                "items": report.items.len(),
                "failed": report.failed_items(),
                "averages": report.averages,
            }),
        ));
        progress.on_experiment_complete(&report);
        Ok(report)
    }

    async fn run_item(
        &self,
        item: &DatasetItem,
        task: &dyn ExperimentTask,
        evaluators: &[Arc<dyn Evaluator>],
    ) -> ItemReport {
        let mut report = ItemReport {
            item_id: item.id.clone(),
            output: None,
            task_error: None,
            scores: Vec::new(),
            evaluator_errors: Vec::new(),
        };

        let output = match task.run(item).await {
            Ok(output) => output,
            Err(e) => {
                warn!(item = %item.id, "Task failed: {}", e);
                report.task_error = Some(e.to_string());
                return report;
            }
        };

        for evaluator in evaluators {
            match evaluator.evaluate(item, &output).await {
                Ok(scores) => report.scores.extend(scores),
                Err(e) => {
                    warn!(item = %item.id, evaluator = evaluator.name(), "Evaluator failed: {}", e);
                    report
                        .evaluator_errors
                        .push(format!("{}: {}", evaluator.name(), e));
                }
            }
        }

        self.conversation_logger.log(ConversationEvent::new(
            "item_evaluated",
            serde_json::json!({
                "item_id": item.id,
                "scores": report.scores,
                "evaluator_errors": report.evaluator_errors,
            }),
        ));
        report.output = Some(output);
        report
    }
}
