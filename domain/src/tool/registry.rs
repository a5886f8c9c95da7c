//! Tool registry: identifier → [`ToolDescriptor`]
//!
//! Built once per session and shared read-only (`Arc<ToolRegistry>`) with the
//! conversation loop. Handler failures never escape [`ToolRegistry::invoke`];
//! they come back as text carrying [`ERROR_MARKER`](super::ERROR_MARKER).

use super::entities::{ToolArguments, ToolCall, ToolDefinition};
use super::handler::ToolDescriptor;
use super::traits::{DefaultToolValidator, ToolValidator};
use super::value_objects::{ToolError, ToolResult};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by registry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    #[error("Invalid arguments for tool '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },
}

impl RegistryError {
    /// Map to the tool error reported back to the provider
    pub fn to_tool_error(&self) -> ToolError {
        match self {
            RegistryError::UnknownTool(name) => ToolError::not_found(format!("tool '{}'", name)),
            RegistryError::InvalidArguments { reason, .. } => {
                ToolError::invalid_argument(reason.clone())
            }
            RegistryError::DuplicateTool(_) => ToolError::execution_failed(self.to_string()),
        }
    }
}

/// Registry of available tools
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolDescriptor>,
    validator: DefaultToolValidator,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Identifiers are unique within a registry.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), RegistryError> {
        let name = descriptor.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(RegistryError::DuplicateTool(name));
        }
        self.tools.insert(name, descriptor);
        Ok(())
    }

    /// Builder-style registration for chained construction
    pub fn with_tool(mut self, descriptor: ToolDescriptor) -> Result<Self, RegistryError> {
        self.register(descriptor)?;
        Ok(self)
    }

    pub fn resolve(&self, name: &str) -> Result<&ToolDescriptor, RegistryError> {
        self.tools
            .get(name)
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Validate arguments against the tool's schema and return the coerced form
    pub fn validate(
        &self,
        name: &str,
        arguments: &ToolArguments,
    ) -> Result<ToolArguments, RegistryError> {
        let descriptor = self.resolve(name)?;
        self.validator
            .validate(arguments, &descriptor.definition)
            .map_err(|reason| RegistryError::InvalidArguments {
                tool: name.to_string(),
                reason,
            })
    }

    /// Resolve, validate, and execute a tool.
    ///
    /// Registry errors (unknown tool, invalid arguments) are returned as `Err`.
    /// A handler error is converted into an `Ok` string prefixed with the error
    /// marker.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: &ToolArguments,
    ) -> Result<String, RegistryError> {
        let descriptor = self.resolve(name)?;
        let coerced = self.validate(name, arguments)?;
        match descriptor.handler.call(coerced).await {
            Ok(output) => Ok(output),
            Err(error) => Ok(error.to_marked_string()),
        }
    }

    /// Execute a provider-issued call, folding every failure into the result.
    ///
    /// This is the entry point used by the conversation loop: the returned
    /// [`ToolResult`] always answers `call.id`, and its [`content`](ToolResult::content)
    /// is what goes into the transcript.
    pub async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        let descriptor = match self.resolve(&call.tool_name) {
            Ok(descriptor) => descriptor,
            Err(e) => return ToolResult::failure(&call.id, &call.tool_name, e.to_tool_error()),
        };
        let coerced = match self.validate(&call.tool_name, &call.arguments) {
            Ok(args) => args,
            Err(e) => return ToolResult::failure(&call.id, &call.tool_name, e.to_tool_error()),
        };
        match descriptor.handler.call(coerced).await {
            Ok(output) => ToolResult::success(&call.id, &call.tool_name, output),
            Err(error) => ToolResult::failure(&call.id, &call.tool_name, error),
        }
    }

    /// Tool definitions sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> =
            self.tools.values().map(|d| d.definition.clone()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Registered tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ERROR_MARKER;
    use crate::tool::entities::{ParamType, ToolParameter};
    use crate::tool::handler::required_f64;
    use serde_json::json;

    fn multiply_tool() -> ToolDescriptor {
        ToolDescriptor::from_fn(
            ToolDefinition::new("multiply", "Multiply two numbers")
                .with_parameter(ToolParameter::new("a", "left", true).with_type(ParamType::Number))
                .with_parameter(ToolParameter::new("b", "right", true).with_type(ParamType::Number)),
            |args| Ok((required_f64(args, "a")? * required_f64(args, "b")?).to_string()),
        )
    }

    fn failing_tool() -> ToolDescriptor {
        ToolDescriptor::from_fn(ToolDefinition::new("broken_oven", "Always fails"), |_| {
            Err(ToolError::execution_failed("oven is cold"))
        })
    }

    fn args(value: serde_json::Value) -> ToolArguments {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = ToolRegistry::new();
        registry.register(multiply_tool()).unwrap();
        let err = registry.register(multiply_tool()).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTool("multiply".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = ToolRegistry::new();
        assert!(matches!(
            registry.resolve("oven"),
            Err(RegistryError::UnknownTool(name)) if name == "oven"
        ));
    }

    #[tokio::test]
    async fn test_invoke_success_with_coercion() {
        let registry = ToolRegistry::new().with_tool(multiply_tool()).unwrap();
        let out = registry
            .invoke("multiply", &args(json!({"a": "6", "b": 7})))
            .await
            .unwrap();
        assert_eq!(out, "42");
    }

    #[tokio::test]
    async fn test_invoke_invalid_arguments() {
        let registry = ToolRegistry::new().with_tool(multiply_tool()).unwrap();

        let missing = registry.invoke("multiply", &args(json!({"a": 1}))).await;
        assert!(matches!(missing, Err(RegistryError::InvalidArguments { .. })));

        let undeclared = registry
            .invoke("multiply", &args(json!({"a": 1, "b": 2, "c": 3})))
            .await;
        assert!(matches!(undeclared, Err(RegistryError::InvalidArguments { .. })));

        let uncoercible = registry
            .invoke("multiply", &args(json!({"a": "six", "b": 2})))
            .await;
        assert!(matches!(uncoercible, Err(RegistryError::InvalidArguments { .. })));
    }

    #[tokio::test]
    async fn test_invoke_handler_error_is_marked() {
        let registry = ToolRegistry::new().with_tool(failing_tool()).unwrap();
        let out = registry.invoke("broken_oven", &ToolArguments::new()).await.unwrap();
        assert!(out.starts_with(ERROR_MARKER));
        assert!(out.contains("oven is cold"));
    }

    #[tokio::test]
    async fn test_dispatch_folds_registry_errors() {
        let registry = ToolRegistry::new().with_tool(multiply_tool()).unwrap();

        let unknown = registry.dispatch(&ToolCall::new("c1", "oven")).await;
        assert_eq!(unknown.call_id, "c1");
        assert!(unknown.content().starts_with(ERROR_MARKER));
        assert!(unknown.content().contains("oven"));

        let invalid = registry
            .dispatch(&ToolCall::new("c2", "multiply").with_arg("a", 2))
            .await;
        assert!(invalid.is_error());
        assert_eq!(invalid.error.as_ref().unwrap().code, "INVALID_ARGUMENT");

        let ok = registry
            .dispatch(&ToolCall::new("c3", "multiply").with_arg("a", 2).with_arg("b", 3))
            .await;
        assert_eq!(ok.content(), "6");
    }

    #[test]
    fn test_definitions_sorted() {
        let registry = ToolRegistry::new()
            .with_tool(multiply_tool())
            .unwrap()
            .with_tool(failing_tool())
            .unwrap();
        let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["broken_oven", "multiply"]);
        assert_eq!(registry.names(), vec!["broken_oven", "multiply"]);
    }
}
