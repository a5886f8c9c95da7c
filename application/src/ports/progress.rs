//! Progress notification port
//!
//! Callbacks for reporting what a run is doing. Implementations live in the
//! presentation layer; every method has a no-op default so a notifier only
//! overrides what it displays.

use brigade_domain::{ExperimentReport, ItemReport, ToolCall, ToolResult};

/// Callback for progress updates during conversation runs and pipelines
pub trait ProgressNotifier: Send + Sync {
    /// A provider call is about to be made for `turn` (1-based) of `max_turns`.
    fn on_turn_start(&self, _turn: usize, _max_turns: usize) {}

    /// The provider returned text alongside tool requests.
    fn on_assistant_text(&self, _text: &str) {}

    /// A tool invocation is about to run.
    fn on_tool_call(&self, _call: &ToolCall) {}

    /// A tool invocation finished (successfully or not).
    fn on_tool_result(&self, _result: &ToolResult) {}

    /// A turn ended without text or tool requests, or the provider timed out.
    fn on_no_progress(&self, _turn: usize, _reason: &str) {}

    /// A structured call failed to parse and will be retried if budget remains.
    fn on_structured_retry(&self, _attempt: usize, _max_attempts: usize, _error: &str) {}

    /// Plan-and-execute: the plan is ready.
    fn on_plan_ready(&self, _steps: &[String]) {}

    /// Plan-and-execute: a step is starting (0-based index).
    fn on_step_start(&self, _index: usize, _step: &str) {}

    /// Experiment: about to process `total` items.
    fn on_experiment_start(&self, _name: &str, _total: usize) {}

    /// Experiment: one item finished.
    fn on_item_complete(&self, _report: &ItemReport) {}

    /// Experiment: all items finished.
    fn on_experiment_complete(&self, _report: &ExperimentReport) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {}
