//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain registry) from "how to serialize
//! them for a provider" (infrastructure). Providers receive the JSON Schema
//! produced here.

use brigade_domain::{ToolDefinition, ToolRegistry};

/// Port for converting tool definitions to provider format (JSON Schema).
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to provider-neutral JSON Schema.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert every registered tool to a JSON Schema array (sorted by name).
    fn registry_schema(&self, registry: &ToolRegistry) -> Vec<serde_json::Value> {
        registry
            .definitions()
            .iter()
            .map(|t| self.tool_to_schema(t))
            .collect()
    }
}
