//! Loop configuration from TOML (`[loop]` section)

use brigade_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw conversation-loop configuration from TOML
///
/// ```toml
/// [loop]
/// max_turns = 5
/// provider_timeout_secs = 120   # 0 disables the timeout
/// tool_timeout_secs = 30        # 0 disables the timeout
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoopConfig {
    pub max_turns: usize,
    pub provider_timeout_secs: u64,
    pub tool_timeout_secs: u64,
}

impl Default for FileLoopConfig {
    fn default() -> Self {
        Self {
            max_turns: 5,
            provider_timeout_secs: 120,
            tool_timeout_secs: 30,
        }
    }
}

impl FileLoopConfig {
    pub fn provider_timeout(&self) -> Option<Duration> {
        secs(self.provider_timeout_secs)
    }

    pub fn tool_timeout(&self) -> Option<Duration> {
        secs(self.tool_timeout_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.max_turns == 0 {
            vec![ConfigIssue::zero_value("loop.max_turns")]
        } else {
            vec![]
        }
    }
}

fn secs(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}
