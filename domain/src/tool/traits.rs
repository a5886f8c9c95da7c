//! Tool domain traits
//!
//! Contains pure domain logic for validating and coercing tool arguments
//! against their definitions. No I/O happens here.

use super::entities::{ParamType, ToolArguments, ToolDefinition};
use serde_json::Value;

/// Validator for tool arguments
pub trait ToolValidator {
    /// Validate `arguments` against `definition`, returning the coerced
    /// arguments that the handler will receive.
    fn validate(
        &self,
        arguments: &ToolArguments,
        definition: &ToolDefinition,
    ) -> Result<ToolArguments, String>;
}

/// Default implementation of ToolValidator
///
/// Rejects missing required parameters and undeclared parameters, then
/// coerces each supplied value to its declared [`ParamType`]. A `null` for an
/// optional parameter is dropped as if it had not been sent.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(
        &self,
        arguments: &ToolArguments,
        definition: &ToolDefinition,
    ) -> Result<ToolArguments, String> {
        for arg_name in arguments.keys() {
            if definition.parameter(arg_name).is_none() {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            }
        }

        let mut coerced = ToolArguments::new();
        for param in &definition.parameters {
            match arguments.get(&param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(format!(
                        "Missing required parameter '{}' for tool '{}'",
                        param.name, definition.name
                    ));
                }
                None | Some(Value::Null) => {}
                Some(value) => {
                    let value = coerce(value, param.param_type).ok_or_else(|| {
                        format!(
                            "Parameter '{}' for tool '{}' expects {}, got {}",
                            param.name, definition.name, param.param_type, value
                        )
                    })?;
                    coerced.insert(param.name.clone(), value);
                }
            }
        }

        Ok(coerced)
    }
}

/// Coerce a JSON value to `target`, or `None` if it cannot be represented.
pub fn coerce(value: &Value, target: ParamType) -> Option<Value> {
    match target {
        ParamType::String => match value {
            Value::String(_) => Some(value.clone()),
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        ParamType::Number => match value {
            Value::Number(_) => Some(value.clone()),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            _ => None,
        },
        ParamType::Integer => match value {
            Value::Number(n) => integral(n.as_f64()?),
            Value::String(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<i64>() {
                    Ok(i) => Some(Value::from(i)),
                    Err(_) => integral(trimmed.parse::<f64>().ok()?),
                }
            }
            _ => None,
        },
        ParamType::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::String(s) => match s.trim() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
    }
}

fn integral(f: f64) -> Option<Value> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(Value::from(f as i64))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolParameter;
    use serde_json::json;

    fn args(value: Value) -> ToolArguments {
        value.as_object().cloned().unwrap()
    }

    fn cost_tool() -> ToolDefinition {
        ToolDefinition::new("calculate_food_cost", "cost")
            .with_parameter(
                ToolParameter::new("price_per_kg", "price", true).with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("weight_kg", "weight", true).with_type(ParamType::Number),
            )
            .with_parameter(ToolParameter::new("note", "note", false))
    }

    #[test]
    fn test_validator_missing_required() {
        let result = DefaultToolValidator.validate(&args(json!({"price_per_kg": 1})), &cost_tool());
        assert!(result.unwrap_err().contains("Missing required parameter 'weight_kg'"));
    }

    #[test]
    fn test_validator_null_required_is_missing() {
        let result = DefaultToolValidator.validate(
            &args(json!({"price_per_kg": 1, "weight_kg": null})),
            &cost_tool(),
        );
        assert!(result.unwrap_err().contains("Missing required parameter"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let result = DefaultToolValidator.validate(
            &args(json!({"price_per_kg": 1, "weight_kg": 2, "currency": "EUR"})),
            &cost_tool(),
        );
        assert!(result.unwrap_err().contains("Unknown parameter 'currency'"));
    }

    #[test]
    fn test_validator_coerces_numeric_strings() {
        let coerced = DefaultToolValidator
            .validate(
                &args(json!({"price_per_kg": "12.5", "weight_kg": 3, "note": null})),
                &cost_tool(),
            )
            .unwrap();

        assert_eq!(coerced.get("price_per_kg"), Some(&json!(12.5)));
        assert_eq!(coerced.get("weight_kg"), Some(&json!(3)));
        assert!(!coerced.contains_key("note"));
    }

    #[test]
    fn test_validator_rejects_uncoercible() {
        let result = DefaultToolValidator.validate(
            &args(json!({"price_per_kg": "cheap", "weight_kg": 3})),
            &cost_tool(),
        );
        assert!(result.unwrap_err().contains("expects number"));
    }

    #[test]
    fn test_coerce_integer() {
        assert_eq!(coerce(&json!(4.0), ParamType::Integer), Some(json!(4)));
        assert_eq!(coerce(&json!("7"), ParamType::Integer), Some(json!(7)));
        assert_eq!(coerce(&json!(" 8.0 "), ParamType::Integer), Some(json!(8)));
        assert_eq!(coerce(&json!(4.5), ParamType::Integer), None);
        assert_eq!(coerce(&json!("4.5"), ParamType::Integer), None);
        assert_eq!(coerce(&json!(true), ParamType::Integer), None);
    }

    #[test]
    fn test_coerce_boolean() {
        assert_eq!(coerce(&json!(true), ParamType::Boolean), Some(json!(true)));
        assert_eq!(coerce(&json!("false"), ParamType::Boolean), Some(json!(false)));
        assert_eq!(coerce(&json!("yes"), ParamType::Boolean), None);
        assert_eq!(coerce(&json!(1), ParamType::Boolean), None);
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce(&json!("March"), ParamType::String), Some(json!("March")));
        assert_eq!(coerce(&json!(3), ParamType::String), Some(json!("3")));
        assert_eq!(coerce(&json!(false), ParamType::String), Some(json!("false")));
        assert_eq!(coerce(&json!(["a"]), ParamType::String), None);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce(&json!(2.25), ParamType::Number), Some(json!(2.25)));
        assert_eq!(coerce(&json!("NaN"), ParamType::Number), None);
        assert_eq!(coerce(&json!({}), ParamType::Number), None);
    }
}
