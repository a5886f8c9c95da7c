//! Progress reporting for conversation runs, plans and experiments

use brigade_application::ProgressNotifier;
use brigade_domain::core::string::preview;
use brigade_domain::{ExperimentReport, ItemReport, ToolCall, ToolResult};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner for turns and a bar for experiments
pub struct ProgressReporter {
    multi: MultiProgress,
    spinner: Mutex<Option<ProgressBar>>,
    experiment_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            spinner: Mutex::new(None),
            experiment_bar: Mutex::new(None),
        }
    }

    fn experiment_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Update the turn spinner, creating it on first use.
    fn with_spinner(&self, update: impl FnOnce(&ProgressBar)) {
        let Ok(mut guard) = self.spinner.lock() else {
            return;
        };
        let spinner = guard.get_or_insert_with(|| {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        });
        update(spinner);
    }

    /// Print a line above the bars without tearing them.
    fn println(&self, line: String) {
        let _ = self.multi.println(line);
    }

    /// Stop the turn spinner, if any.
    pub fn finish(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_turn_start(&self, turn: usize, max_turns: usize) {
        self.with_spinner(|pb| {
            pb.set_prefix(format!("Turn {}/{}", turn, max_turns));
            pb.set_message("waiting for provider...");
        });
    }

    fn on_assistant_text(&self, text: &str) {
        self.println(format!("{} {}", "assistant:".dimmed(), preview(text, 100)));
    }

    fn on_tool_call(&self, call: &ToolCall) {
        self.with_spinner(|pb| pb.set_message(format!("running {}", call.tool_name)));
    }

    fn on_tool_result(&self, result: &ToolResult) {
        let mark = if result.is_error() {
            "x".red()
        } else {
            "v".green()
        };
        self.println(format!(
            "  {} {} {}",
            mark,
            result.tool_name.bold(),
            preview(&result.content(), 80).dimmed()
        ));
    }

    fn on_no_progress(&self, turn: usize, reason: &str) {
        self.println(format!("  {} turn {}: {}", "!".yellow(), turn, reason));
    }

    fn on_structured_retry(&self, attempt: usize, max_attempts: usize, error: &str) {
        self.println(format!(
            "  {} retry {}/{}: {}",
            "!".yellow(),
            attempt,
            max_attempts,
            preview(error, 80)
        ));
    }

    fn on_plan_ready(&self, steps: &[String]) {
        self.println(format!("{} {} step(s)", "Plan:".cyan().bold(), steps.len()));
        for (i, step) in steps.iter().enumerate() {
            self.println(format!("  {}. {}", i + 1, step));
        }
    }

    fn on_step_start(&self, index: usize, step: &str) {
        self.with_spinner(|pb| {
            pb.set_prefix(format!("Step {}", index + 1));
            pb.set_message(preview(step, 60));
        });
    }

    fn on_experiment_start(&self, name: &str, total: usize) {
        let pb = self.multi.add(ProgressBar::new(total as u64));
        pb.set_style(Self::experiment_style());
        pb.set_prefix(name.to_string());
        pb.set_message("Starting...");
        if let Ok(mut guard) = self.experiment_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_item_complete(&self, report: &ItemReport) {
        if let Ok(guard) = self.experiment_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            let status = if report.succeeded() {
                format!("{} {}", "v".green(), report.item_id)
            } else {
                format!("{} {}", "x".red(), report.item_id)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_experiment_complete(&self, report: &ExperimentReport) {
        self.finish();
        if let Ok(mut guard) = self.experiment_bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_with_message(format!(
                "{} ({} failed)",
                "complete!".green(),
                report.failed_items()
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_turn_start(&self, turn: usize, max_turns: usize) {
        eprintln!("{} {}", "->".cyan(), format!("Turn {}/{}", turn, max_turns).bold());
    }

    fn on_tool_call(&self, call: &ToolCall) {
        eprintln!("  {} {}", "tool".magenta(), call.tool_name);
    }

    fn on_tool_result(&self, result: &ToolResult) {
        if result.is_error() {
            eprintln!("  {} {} (error)", "x".red(), result.tool_name);
        } else {
            eprintln!("  {} {}", "v".green(), result.tool_name);
        }
    }

    fn on_no_progress(&self, turn: usize, reason: &str) {
        eprintln!("  {} turn {}: {}", "!".yellow(), turn, reason);
    }

    fn on_structured_retry(&self, attempt: usize, max_attempts: usize, error: &str) {
        eprintln!("  {} retry {}/{}: {}", "!".yellow(), attempt, max_attempts, error);
    }

    fn on_step_start(&self, index: usize, step: &str) {
        eprintln!("{} Step {}: {}", "->".cyan(), index + 1, step);
    }

    fn on_experiment_start(&self, name: &str, total: usize) {
        eprintln!("{} {} ({} items)", "->".cyan(), name.bold(), total);
    }

    fn on_item_complete(&self, report: &ItemReport) {
        if report.succeeded() {
            eprintln!("  {} {}", "v".green(), report.item_id);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), report.item_id);
        }
    }
}
