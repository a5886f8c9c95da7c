//! Presentation-level configuration
//!
//! Resolved output settings: config file values with CLI overrides applied.

use crate::cli::commands::OutputFormatArg;
use brigade_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self {
            format,
            color,
            show_progress: true,
        }
    }

    /// Apply `--output` and `--quiet`. JSON output never shows progress.
    pub fn with_cli_overrides(mut self, output: Option<OutputFormatArg>, quiet: bool) -> Self {
        if let Some(arg) = output {
            self.format = arg.into();
        }
        self.show_progress = !quiet && self.format != OutputFormat::Json;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_format_wins() {
        let config = OutputConfig::new(OutputFormat::Full, true)
            .with_cli_overrides(Some(OutputFormatArg::Answer), false);
        assert_eq!(config.format, OutputFormat::Answer);
        assert!(config.show_progress);
    }

    #[test]
    fn test_file_format_kept_without_flag() {
        let config = OutputConfig::new(OutputFormat::Full, false).with_cli_overrides(None, true);
        assert_eq!(config.format, OutputFormat::Full);
        assert!(!config.show_progress);
        assert!(!config.color);
    }

    #[test]
    fn test_json_hides_progress() {
        let config = OutputConfig::default().with_cli_overrides(Some(OutputFormatArg::Json), false);
        assert!(!config.show_progress);
    }
}
