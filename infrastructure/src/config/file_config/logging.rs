//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ```toml
/// [logging]
/// conversation_log = "logs/brigade.conversation.jsonl"
/// file = "logs/brigade.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving conversation events; none disables it
    pub conversation_log: Option<PathBuf>,
    /// Diagnostic log file; none logs to stderr
    pub file: Option<PathBuf>,
}
