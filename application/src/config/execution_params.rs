//! Execution parameters: use case loop control.
//!
//! [`ExecutionParams`] groups the static parameters that bound a run: the
//! turn budget of the conversation loop, the attempt budget of structured
//! calls, per-call timeouts, and experiment concurrency. These are
//! application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Execution loop control parameters.
///
/// | Field | Used by |
/// |-------|---------|
/// | `max_turns` | conversation loop, sub-agent tools |
/// | `max_attempts` | structured calls (plans, judge scores) |
/// | `provider_timeout` | every provider call |
/// | `tool_timeout` | every tool dispatch in the loop |
/// | `concurrency` | experiment runner |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum provider round-trips in one conversation run.
    pub max_turns: usize,
    /// Maximum attempts (first call included) for a structured call.
    pub max_attempts: usize,
    /// Timeout for a single provider call.
    pub provider_timeout: Option<Duration>,
    /// Timeout for a single tool handler.
    pub tool_timeout: Option<Duration>,
    /// Dataset items processed at once by the experiment runner.
    pub concurrency: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_turns: 5,
            max_attempts: 2,
            provider_timeout: Some(Duration::from_secs(120)),
            tool_timeout: Some(Duration::from_secs(30)),
            concurrency: 1,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    pub fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.tool_timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}
