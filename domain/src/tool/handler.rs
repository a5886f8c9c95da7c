//! Executable side of a tool
//!
//! A [`ToolDescriptor`] pairs a [`ToolDefinition`] (the schema the provider
//! sees) with a [`ToolHandler`] (the code that runs). Handlers receive
//! arguments that have already been validated and coerced.

use super::entities::{ToolArguments, ToolDefinition};
use super::value_objects::ToolError;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Executes a tool with validated arguments
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: ToolArguments) -> Result<String, ToolError>;
}

pub type BoxedFuture = Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send>>;

/// Handler backed by a synchronous closure.
///
/// Most kitchen tools are plain functions over their arguments; this keeps
/// them free of async boilerplate.
pub struct FnTool<F>(pub F);

#[async_trait]
impl<F> ToolHandler for FnTool<F>
where
    F: Fn(&ToolArguments) -> Result<String, ToolError> + Send + Sync,
{
    async fn call(&self, arguments: ToolArguments) -> Result<String, ToolError> {
        (self.0)(&arguments)
    }
}

/// Handler backed by a closure returning a boxed future
pub struct AsyncFnTool<F>(pub F);

#[async_trait]
impl<F> ToolHandler for AsyncFnTool<F>
where
    F: Fn(ToolArguments) -> BoxedFuture + Send + Sync,
{
    async fn call(&self, arguments: ToolArguments) -> Result<String, ToolError> {
        (self.0)(arguments).await
    }
}

/// A tool as stored in the registry: schema plus handler
#[derive(Clone)]
pub struct ToolDescriptor {
    pub definition: ToolDefinition,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    pub fn new(definition: ToolDefinition, handler: impl ToolHandler + 'static) -> Self {
        Self {
            definition,
            handler: Arc::new(handler),
        }
    }

    /// Convenience constructor for synchronous handlers
    pub fn from_fn<F>(definition: ToolDefinition, f: F) -> Self
    where
        F: Fn(&ToolArguments) -> Result<String, ToolError> + Send + Sync + 'static,
    {
        Self::new(definition, FnTool(f))
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Read a string argument, failing with `INVALID_ARGUMENT` when absent.
pub fn required_str<'a>(arguments: &'a ToolArguments, key: &str) -> Result<&'a str, ToolError> {
    arguments
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::invalid_argument(format!("Missing '{}' argument", key)))
}

/// Read a numeric argument, failing with `INVALID_ARGUMENT` when absent.
pub fn required_f64(arguments: &ToolArguments, key: &str) -> Result<f64, ToolError> {
    arguments
        .get(key)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| ToolError::invalid_argument(format!("Missing '{}' argument", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolParameter;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_tool_call() {
        let descriptor = ToolDescriptor::from_fn(
            ToolDefinition::new("echo", "Echo the input")
                .with_parameter(ToolParameter::new("text", "Text", true)),
            |args| Ok(required_str(args, "text")?.to_uppercase()),
        );

        let mut args = ToolArguments::new();
        args.insert("text".to_string(), json!("mise en place"));
        let output = descriptor.handler.call(args).await.unwrap();
        assert_eq!(output, "MISE EN PLACE");
        assert_eq!(descriptor.name(), "echo");
    }

    #[tokio::test]
    async fn test_async_fn_tool_call() {
        let handler = AsyncFnTool(|args: ToolArguments| -> BoxedFuture {
            Box::pin(async move {
                let n = required_f64(&args, "n")?;
                Ok(format!("{}", n * 2.0))
            })
        });

        let mut args = ToolArguments::new();
        args.insert("n".to_string(), json!(21));
        assert_eq!(handler.call(args).await.unwrap(), "42");

        let err = handler.call(ToolArguments::new()).await.unwrap_err();
        assert_eq!(err.code, "INVALID_ARGUMENT");
    }
}
