//! Console output formatter for brigade results

use crate::output::formatter::OutputFormatter;
use brigade_domain::core::string::preview;
use brigade_domain::{
    ExperimentReport, LoopOutcome, OutputFormat, PlanRunResult, ToolDefinition, Turn,
};
use colored::Colorize;

/// Formats run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the outcome of a conversation run
    pub fn format_outcome(task: &str, outcome: &LoopOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::outcome_json(task, outcome),
            OutputFormat::Answer => match outcome.best_effort_answer() {
                Some(answer) if outcome.is_completed() => format!("{}\n", answer),
                Some(partial) => format!(
                    "{}\n{}\n",
                    "No final answer within the turn budget. Last assistant text:".yellow(),
                    partial
                ),
                None => format!("{}\n", "No final answer within the turn budget.".yellow()),
            },
            OutputFormat::Full => Self::outcome_full(task, outcome),
        }
    }

    fn outcome_full(task: &str, outcome: &LoopOutcome) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Conversation Result"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Task:".cyan().bold(), task));

        match outcome {
            LoopOutcome::Completed(answer) => {
                output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), "completed".green()));
                output.push_str(&Self::section_header("Answer"));
                output.push_str(answer);
                output.push('\n');
            }
            LoopOutcome::Exhausted(transcript) => {
                output.push_str(&format!(
                    "{} {}\n",
                    "Status:".cyan().bold(),
                    "turn budget exhausted".yellow()
                ));
                output.push_str(&Self::section_header("Transcript"));
                for turn in transcript.turns() {
                    output.push_str(&Self::turn_line(turn));
                }
            }
        }

        output.push_str(&Self::footer());
        output
    }

    fn turn_line(turn: &Turn) -> String {
        match turn {
            Turn::Assistant(assistant) if assistant.has_tool_calls() => {
                let calls = assistant
                    .tool_calls
                    .iter()
                    .map(|c| c.tool_name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "  {} {} {}\n",
                    "assistant".yellow(),
                    preview(&assistant.content, 80),
                    format!("-> {}", calls).dimmed()
                )
            }
            Turn::Tool { invocation_id, content } => format!(
                "  {} [{}] {}\n",
                "tool".magenta(),
                invocation_id,
                preview(content, 100)
            ),
            other => format!("  {} {}\n", other.role().yellow(), preview(other.content(), 100)),
        }
    }

    fn outcome_json(task: &str, outcome: &LoopOutcome) -> String {
        let value = match outcome {
            LoopOutcome::Completed(answer) => serde_json::json!({
                "task": task,
                "status": "completed",
                "answer": answer,
            }),
            LoopOutcome::Exhausted(transcript) => serde_json::json!({
                "task": task,
                "status": "exhausted",
                "transcript": transcript,
            }),
        };
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a plan-and-execute result
    pub fn format_plan(result: &PlanRunResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Answer => format!("{}\n", result.final_answer),
            OutputFormat::Full => {
                let mut output = String::new();
                output.push_str(&Self::header("Plan and Execute"));
                output.push('\n');
                output.push_str(&format!("{} {}\n", "Request:".cyan().bold(), result.request));
                if !result.plan_retries.is_empty() {
                    output.push_str(&format!(
                        "{} {}\n",
                        "Plan retries:".dimmed(),
                        result.plan_retries.len()
                    ));
                }

                output.push_str(&Self::section_header("Steps"));
                for step in &result.step_results {
                    output.push_str(&format!(
                        "\n{}\n{}\n",
                        format!("── {}. {} ──", step.step_index + 1, step.step)
                            .yellow()
                            .bold(),
                        step.output
                    ));
                }

                output.push_str(&Self::section_header("Final Answer"));
                output.push_str(&format!("\n{}\n", result.final_answer));
                output.push_str(&Self::footer());
                output
            }
        }
    }

    /// Format an experiment report
    pub fn format_experiment(report: &ExperimentReport, format: OutputFormat) -> String {
        if format == OutputFormat::Json {
            return serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
        }

        let mut output = String::new();
        output.push_str(&Self::header(&format!("Experiment: {}", report.name)));
        output.push('\n');

        if format == OutputFormat::Full {
            output.push_str(&Self::section_header("Items"));
            for item in &report.items {
                match &item.task_error {
                    None => output.push_str(&format!("{} {}\n", "v".green(), item.item_id.bold())),
                    Some(error) => output.push_str(&format!(
                        "{} {} {}\n",
                        "x".red(),
                        item.item_id.bold(),
                        error.red()
                    )),
                }
                if let Some(text) = &item.output {
                    output.push_str(&format!("    {}\n", preview(text, 100).dimmed()));
                }
                for score in &item.scores {
                    let comment = score
                        .comment
                        .as_deref()
                        .map(|c| format!(" ({})", c))
                        .unwrap_or_default();
                    output.push_str(&format!("    {} = {:.2}{}\n", score.name, score.value, comment));
                }
                for error in &item.evaluator_errors {
                    output.push_str(&format!("    {} {}\n", "evaluator:".yellow(), error));
                }
            }
        }

        output.push_str(&Self::section_header("Averages"));
        if report.averages.is_empty() {
            output.push_str(&format!("{}\n", "No scores recorded.".dimmed()));
        }
        for (name, value) in &report.averages {
            output.push_str(&format!("  {:<24} {:.3}\n", name, value));
        }
        output.push_str(&format!(
            "\n{} {} / {}\n",
            "Items succeeded:".cyan().bold(),
            report.items.len() - report.failed_items(),
            report.items.len()
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format the registered tools as an aligned list
    pub fn format_tools(tools: &[ToolDefinition]) -> String {
        let mut output = String::new();
        for tool in tools {
            output.push_str(&format!("{}\n", tool.name.cyan().bold()));
            output.push_str(&format!("{}\n", Self::indent(&tool.description, "  ")));
            for param in &tool.parameters {
                let marker = if param.required { "required" } else { "optional" };
                output.push_str(&format!(
                    "    {} ({}, {}) {}\n",
                    param.name.yellow(),
                    param.param_type.as_str(),
                    marker,
                    param.description.dimmed()
                ));
            }
            output.push('\n');
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_outcome(&self, task: &str, outcome: &LoopOutcome, format: OutputFormat) -> String {
        Self::format_outcome(task, outcome, format)
    }

    fn format_plan(&self, result: &PlanRunResult, format: OutputFormat) -> String {
        Self::format_plan(result, format)
    }

    fn format_experiment(&self, report: &ExperimentReport, format: OutputFormat) -> String {
        Self::format_experiment(report, format)
    }

    fn format_tools(&self, tools: &[ToolDefinition]) -> String {
        Self::format_tools(tools)
    }
}
