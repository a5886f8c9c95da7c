//! get_reservations: table bookings for a date

use brigade_domain::tool::required_str;
use brigade_domain::{ToolArguments, ToolDefinition, ToolDescriptor, ToolError, ToolParameter};
use regex::Regex;

pub const GET_RESERVATIONS: &str = "get_reservations";

const DATE_PATTERN: &str = r"^\d{2}/\d{2}/\d{4}$";

const BOOKINGS: [(&str, &str); 2] = [
    ("15/03/2025", "FULL SERVICE: 45 covers (VIP table booked)"),
    ("16/03/2025", "Light service: 12 covers"),
];

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_RESERVATIONS,
        "Get restaurant table reservations for a specific date.",
    )
    .with_parameter(ToolParameter::new(
        "date",
        "The date to check in format 'DD/MM/YYYY'",
        true,
    ))
}

/// Rejects any date not written `DD/MM/YYYY`.
pub fn execute(arguments: &ToolArguments) -> Result<String, ToolError> {
    let date = required_str(arguments, "date")?;
    let pattern =
        Regex::new(DATE_PATTERN).map_err(|e| ToolError::execution_failed(e.to_string()))?;
    if !pattern.is_match(date) {
        return Err(ToolError::invalid_argument(format!(
            "invalid date format '{}'. Expected DD/MM/YYYY.",
            date
        )));
    }
    Ok(BOOKINGS
        .iter()
        .find(|(day, _)| *day == date)
        .map(|(_, booking)| booking.to_string())
        .unwrap_or_else(|| format!("No reservations found for {}", date)))
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::from_fn(definition(), execute)
}
