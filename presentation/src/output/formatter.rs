//! Output formatter trait

use brigade_domain::{ExperimentReport, LoopOutcome, OutputFormat, PlanRunResult, ToolDefinition};

/// Trait for rendering run results
pub trait OutputFormatter {
    /// Render the outcome of a conversation run
    fn format_outcome(&self, task: &str, outcome: &LoopOutcome, format: OutputFormat) -> String;

    /// Render a plan-and-execute result
    fn format_plan(&self, result: &PlanRunResult, format: OutputFormat) -> String;

    /// Render an experiment report
    fn format_experiment(&self, report: &ExperimentReport, format: OutputFormat) -> String;

    /// Render the tool catalogue
    fn format_tools(&self, tools: &[ToolDefinition]) -> String;
}
