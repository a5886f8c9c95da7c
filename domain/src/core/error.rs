//! Domain error types

use thiserror::Error;

/// Provider text could not be turned into the expected structured value.
///
/// Produced by the parse functions handed to the structured-output retry
/// wrapper (plan parsing, judge score parsing).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("invalid JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let error = ParseError::new("missing 'steps'");
        assert_eq!(error.to_string(), "missing 'steps'");
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let parse: ParseError = err.into();
        assert!(parse.message.starts_with("invalid JSON"));
    }
}
