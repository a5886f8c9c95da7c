//! Configuration file loading for brigade
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `BRIGADE_`-prefixed environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./brigade.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/brigade/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileExperimentConfig, FileLoggingConfig, FileLoopConfig, FileOutputConfig,
    FileStructuredConfig,
};
pub use loader::{ConfigLoader, ConfigSource, ENV_PREFIX, PROJECT_CONFIG_FILE};
