//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section defaults field by field, so a partial file is valid.

mod logging;
mod output;
mod pipeline;
mod run_loop;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use pipeline::{FileExperimentConfig, FileStructuredConfig};
pub use run_loop::FileLoopConfig;

use brigade_application::ExecutionParams;
use brigade_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Conversation loop budget and timeouts
    #[serde(rename = "loop")]
    pub run_loop: FileLoopConfig,
    /// Structured-output retry settings
    pub structured: FileStructuredConfig,
    /// Experiment runner settings
    pub experiment: FileExperimentConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Zero budgets are errors; an unknown output format is a warning.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.run_loop.validate());
        issues.extend(self.structured.validate());
        issues.extend(self.experiment.validate());
        issues.extend(self.output.parse_format().1);
        issues
    }

    /// Runtime parameters for the use cases
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_turns(self.run_loop.max_turns)
            .with_max_attempts(self.structured.max_attempts)
            .with_provider_timeout(self.run_loop.provider_timeout())
            .with_tool_timeout(self.run_loop.tool_timeout())
            .with_concurrency(self.experiment.concurrency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_domain::ConfigIssueCode;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[loop]
max_turns = 8
provider_timeout_secs = 60
tool_timeout_secs = 0

[structured]
max_attempts = 3

[experiment]
concurrency = 4
judge = true
criteria = ["relevance"]

[logging]
conversation_log = "logs/run.jsonl"

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.run_loop.max_turns, 8);
        assert_eq!(config.structured.max_attempts, 3);
        assert_eq!(config.experiment.concurrency, 4);
        assert!(config.experiment.judge);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some(std::path::Path::new("logs/run.jsonl"))
        );
        assert!(!config.output.color);
        assert!(config.validate().is_empty());

        let params = config.execution_params();
        assert_eq!(params.max_turns, 8);
        assert_eq!(params.provider_timeout, Some(Duration::from_secs(60)));
        assert_eq!(params.tool_timeout, None);
        assert_eq!(params.concurrency, 4);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[loop]
max_turns = 2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.run_loop.max_turns, 2);
        // Defaults should apply
        assert_eq!(config.run_loop.tool_timeout_secs, 30);
        assert_eq!(config.structured.max_attempts, 2);
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.run_loop.max_turns, 5);
        assert_eq!(config.experiment.concurrency, 1);
        assert!(config.logging.conversation_log.is_none());
        assert_eq!(config.execution_params(), ExecutionParams::default());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let toml_str = r#"
[loop]
max_turns = 0

[structured]
max_attempts = 0

[experiment]
concurrency = 0

[output]
format = "xml"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 3);
        assert!(matches!(
            &issues[3].code,
            ConfigIssueCode::InvalidEnumValue { field, .. } if field == "output.format"
        ));
    }
}
