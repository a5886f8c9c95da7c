//! Output configuration from TOML (`[output]` section)

use brigade_domain::{ConfigIssue, OutputFormat};
use serde::{Deserialize, Serialize};

/// Raw output configuration from TOML
///
/// ```toml
/// [output]
/// format = "answer"   # "full", "answer", "json"
/// color = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format name; unknown values fall back to `answer`
    pub format: String,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default().as_str().to_string(),
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Parse the format, returning a warning when the value is unknown.
    pub fn parse_format(&self) -> (OutputFormat, Vec<ConfigIssue>) {
        match self.format.parse::<OutputFormat>() {
            Ok(format) => (format, vec![]),
            Err(_) => {
                let fallback = OutputFormat::default();
                let issue = ConfigIssue::invalid_enum(
                    "output.format",
                    &self.format,
                    &OutputFormat::VALID_VALUES,
                    fallback.as_str(),
                );
                (fallback, vec![issue])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_domain::Severity;

    #[test]
    fn test_output_format_deserialize() {
        let toml_str = r#"
[output]
format = "json"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.parse_format().0, OutputFormat::Json);
        assert!(config.output.color);
    }

    #[test]
    fn test_unknown_format_falls_back() {
        let config = FileOutputConfig {
            format: "yaml".to_string(),
            color: false,
        };
        let (format, issues) = config.parse_format();
        assert_eq!(format, OutputFormat::Answer);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }
}
