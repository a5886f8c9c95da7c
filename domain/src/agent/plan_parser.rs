//! Plan parsing from provider text.
//!
//! Accepts either a ` ```plan ` fenced block holding JSON or a response that
//! is JSON in its entirety. The JSON must be an object with a non-empty
//! `steps` array; each step is a string or an object with a `description`.

use super::plan::Plan;
use crate::core::error::ParseError;
use serde_json::Value;

/// Parse a plan from model response text.
pub fn parse_plan(response: &str) -> Result<Plan, ParseError> {
    if let Some(block) = fenced_block(response, "plan") {
        let parsed: Value = serde_json::from_str(&block)?;
        return parse_plan_json(&parsed);
    }

    let trimmed = strip_generic_fence(response.trim());
    let parsed: Value = serde_json::from_str(trimmed)?;
    parse_plan_json(&parsed)
}

/// Parse a plan from a JSON value.
///
/// Expected schema:
/// ```json
/// { "steps": ["step description", { "description": "another step" }] }
/// ```
pub fn parse_plan_json(json: &Value) -> Result<Plan, ParseError> {
    let steps = json
        .get("steps")
        .and_then(|v| v.as_array())
        .ok_or_else(|| ParseError::new("expected an object with a 'steps' array"))?;

    let mut descriptions = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let description = match step {
            Value::String(s) => s.clone(),
            Value::Object(obj) => obj
                .get("description")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    ParseError::new(format!("step {} has no 'description'", index + 1))
                })?,
            other => {
                return Err(ParseError::new(format!(
                    "step {} must be a string or object, got {}",
                    index + 1,
                    other
                )));
            }
        };
        descriptions.push(description);
    }

    Plan::new(descriptions).ok_or_else(|| ParseError::new("plan has no steps"))
}

/// Content of the first ```` ```<tag> ```` block, if any
fn fenced_block(text: &str, tag: &str) -> Option<String> {
    let opener = format!("```{}", tag);
    let mut block: Option<String> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(current) = block.as_mut() {
            if trimmed == "```" {
                return block;
            }
            current.push_str(line);
            current.push('\n');
        } else if trimmed == opener {
            block = Some(String::new());
        }
    }
    None
}

/// Drop a surrounding ```` ```json ```` / ```` ``` ```` fence if present
fn strip_generic_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fenced_plan_block() {
        let response = r#"Here is my plan:

```plan
{"steps": ["List seasonal vegetables", "Draft dinners", "Plan leftovers for lunch"]}
```

Ready to cook."#;

        let plan = parse_plan(response).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.steps()[2], "Plan leftovers for lunch");
    }

    #[test]
    fn test_parse_raw_json() {
        let plan = parse_plan(r#"{"steps": ["one", "two"]}"#).unwrap();
        assert_eq!(plan.steps(), ["one", "two"]);
    }

    #[test]
    fn test_parse_json_fence() {
        let plan = parse_plan("```json\n{\"steps\": [\"only\"]}\n```").unwrap();
        assert_eq!(plan.steps(), ["only"]);
    }

    #[test]
    fn test_parse_object_steps() {
        let plan = parse_plan(
            r#"{"steps": [{"description": "Check budget"}, "Pick proteins"]}"#,
        )
        .unwrap();
        assert_eq!(plan.steps(), ["Check budget", "Pick proteins"]);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_plan("This is just some text").is_err());
        assert!(parse_plan(r#"{"tasks": ["x"]}"#).is_err());
        assert!(parse_plan(r#"{"steps": []}"#).is_err());
        assert!(parse_plan(r#"{"steps": [{"name": "x"}]}"#).is_err());
        assert!(parse_plan(r#"{"steps": [42]}"#).is_err());
    }

    #[test]
    fn test_parse_error_messages() {
        let err = parse_plan(r#"{"steps": []}"#).unwrap_err();
        assert_eq!(err.message, "plan has no steps");

        let err = parse_plan("{broken").unwrap_err();
        assert!(err.message.starts_with("invalid JSON"));
    }
}
