//! Tool domain value objects: immutable result and error types
//!
//! Every dispatched invocation produces a [`ToolResult`]. Failures are never
//! propagated out of the registry; they are rendered as text starting with
//! [`ERROR_MARKER`] so the provider can read them on the next turn and correct
//! itself.

use serde::{Deserialize, Serialize};

/// Prefix of every tool-result string that reports a failure.
pub const ERROR_MARKER: &str = "Error:";

/// Error raised by a tool handler (or synthesized by the registry).
///
/// | Code | Raised by |
/// |------|-----------|
/// | `INVALID_ARGUMENT` | argument validation, or a handler rejecting its input |
/// | `NOT_FOUND` | unknown tool, or a resource missing inside a handler |
/// | `EXECUTION_FAILED` | any other handler failure |
/// | `TIMEOUT` | the per-call handler timeout elapsed |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "INVALID_ARGUMENT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            "TIMEOUT",
            format!("Operation timed out: {}", operation.into()),
        )
    }

    /// Render as tool-result text carrying the error marker
    pub fn to_marked_string(&self) -> String {
        format!("{} {}", ERROR_MARKER, self)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Outcome of one dispatched tool invocation.
///
/// Correlated with its request through `call_id`; the loop appends exactly one
/// tool turn per result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Invocation id this result answers
    pub call_id: String,
    /// Name of the tool that was requested
    pub tool_name: String,
    /// Whether the handler produced output
    pub success: bool,
    /// Output content (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            error: None,
        }
    }

    /// Create a failed result
    pub fn failure(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        error: ToolError,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        !self.success
    }

    /// Text that goes into the transcript's tool turn.
    ///
    /// Failures are prefixed with [`ERROR_MARKER`].
    pub fn content(&self) -> String {
        match (&self.output, &self.error) {
            (_, Some(error)) => error.to_marked_string(),
            (Some(output), None) => output.clone(),
            (None, None) => String::new(),
        }
    }
}
