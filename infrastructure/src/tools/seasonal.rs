//! get_seasonal_products: seasonal ingredients in France by month

use brigade_domain::tool::required_str;
use brigade_domain::{ToolArguments, ToolDefinition, ToolDescriptor, ToolError, ToolParameter};

pub const GET_SEASONAL_PRODUCTS: &str = "get_seasonal_products";

const SEASONAL: [(&str, &str); 4] = [
    ("March", "Asparagus, Spinach, Radish, Lemon, Kiwi"),
    ("June", "Strawberry, Zucchini, Tomato, Cherry, Apricot"),
    ("October", "Pumpkin, Mushroom, Apple, Pear, Grapes"),
    ("December", "Chestnut, Truffle, Scallop, Clementine"),
];

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_SEASONAL_PRODUCTS,
        "Returns the list of seasonal ingredients for a specific month in France.",
    )
    .with_parameter(ToolParameter::new(
        "month",
        "The month name (e.g., 'March', 'June')",
        true,
    ))
}

/// Month names match case-insensitively. An unknown month is not an error.
pub fn execute(arguments: &ToolArguments) -> Result<String, ToolError> {
    let month = required_str(arguments, "month")?.trim();
    Ok(SEASONAL
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(month))
        .map(|(_, products)| products.to_string())
        .unwrap_or_else(|| format!("No data available for {}", month)))
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::from_fn(definition(), execute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn month(value: &str) -> ToolArguments {
        json!({ "month": value }).as_object().cloned().unwrap()
    }

    #[test]
    fn test_known_month() {
        assert_eq!(
            execute(&month("March")).unwrap(),
            "Asparagus, Spinach, Radish, Lemon, Kiwi"
        );
        assert_eq!(
            execute(&month(" december ")).unwrap(),
            "Chestnut, Truffle, Scallop, Clementine"
        );
    }

    #[test]
    fn test_unknown_month() {
        assert_eq!(
            execute(&month("Brumaire")).unwrap(),
            "No data available for Brumaire"
        );
    }
}
