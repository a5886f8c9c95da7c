//! Infrastructure layer for brigade
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration loading, conversation logs,
//! the replay provider, the dataset loader and the kitchen tools.

pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigSource, FileConfig, FileExperimentConfig, FileLoggingConfig,
    FileLoopConfig, FileOutputConfig, FileStructuredConfig,
};
pub use dataset::{Dataset, load_dataset};
pub use error::LoadError;
pub use logging::{BackgroundConversationLogger, JsonlConversationLogger};
pub use providers::{ReplayEntry, ReplayProvider};
pub use tools::{
    JsonSchemaToolConverter, MenuDatabase, back_office_registry, kitchen_registry,
    service_registry,
};
