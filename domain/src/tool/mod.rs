//! Tool domain module
//!
//! Defines how the conversation loop reaches beyond text generation: every
//! tool is a [`ToolDefinition`] (name, description, typed parameters) paired
//! with a [`ToolHandler`] inside a [`ToolDescriptor`], and collected in a
//! [`ToolRegistry`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolRegistry │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (descriptors)│    │ (invocation) │    │ (content)    │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! Arguments are validated and coerced by [`DefaultToolValidator`] before a
//! handler runs. Failures of any kind surface as result text starting with
//! [`ERROR_MARKER`], never as a propagated error, so the loop can continue.

pub mod entities;
pub mod handler;
pub mod registry;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, ToolArguments, ToolCall, ToolDefinition, ToolParameter};
pub use handler::{
    AsyncFnTool, BoxedFuture, FnTool, ToolDescriptor, ToolHandler, required_f64, required_str,
};
pub use registry::{RegistryError, ToolRegistry};
pub use traits::{DefaultToolValidator, ToolValidator, coerce};
pub use value_objects::{ERROR_MARKER, ToolError, ToolResult};
