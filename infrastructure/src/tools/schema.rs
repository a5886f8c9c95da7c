//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces provider-neutral
//! JSON Schema for native tool use.

use brigade_application::ports::tool_schema::ToolSchemaPort;
use brigade_domain::ToolDefinition;

/// Default implementation producing provider-neutral JSON Schema.
///
/// Each [`ParamType`](brigade_domain::ParamType) maps to the JSON Schema type
/// of the same name.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": param.param_type.as_str(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::kitchen_registry;

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let schema = converter.tool_to_schema(&crate::tools::cost::food_cost_definition());

        assert_eq!(schema["name"], "calculate_food_cost");
        assert_eq!(schema["input_schema"]["type"], "object");

        let price = &schema["input_schema"]["properties"]["price_per_kg"];
        assert_eq!(price["type"], "number");
        assert!(price["description"].as_str().unwrap().contains("kilogram"));

        let required = schema["input_schema"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
    }

    #[test]
    fn test_optional_parameters_not_required() {
        let converter = JsonSchemaToolConverter;
        let schema = converter.tool_to_schema(&crate::tools::MenuDatabase::definition());
        assert_eq!(schema["input_schema"]["properties"]["max_price"]["type"], "number");
        assert!(schema["input_schema"]["required"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_registry_schema_sorted() {
        let registry = kitchen_registry().unwrap();
        let tools = JsonSchemaToolConverter.registry_schema(&registry);
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(
            names,
            vec![
                "calculate",
                "calculate_food_cost",
                "get_reservations",
                "get_seasonal_products",
                "menu_database",
            ]
        );
    }
}
