//! Structured-call and experiment settings (`[structured]`, `[experiment]`)

use brigade_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// ```toml
/// [structured]
/// max_attempts = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStructuredConfig {
    /// Provider calls allowed before a structured call gives up
    pub max_attempts: usize,
}

impl Default for FileStructuredConfig {
    fn default() -> Self {
        Self { max_attempts: 2 }
    }
}

/// ```toml
/// [experiment]
/// concurrency = 1
/// judge = false
/// criteria = ["relevance", "creativity", "practicality"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExperimentConfig {
    /// Items evaluated in parallel
    pub concurrency: usize,
    /// Add the model-graded judge to the rule evaluator
    pub judge: bool,
    /// Judge criteria; empty means the built-in defaults
    pub criteria: Vec<String>,
}

impl Default for FileExperimentConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            judge: false,
            criteria: Vec::new(),
        }
    }
}

impl FileStructuredConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.max_attempts == 0 {
            vec![ConfigIssue::zero_value("structured.max_attempts")]
        } else {
            vec![]
        }
    }
}

impl FileExperimentConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.concurrency == 0 {
            vec![ConfigIssue::zero_value("experiment.concurrency")]
        } else {
            vec![]
        }
    }
}
