//! Kitchen tools
//!
//! Concrete tools for the head-chef assistant, plus the JSON Schema
//! converter that exposes any registry to a provider.
//!
//! | Tool | Module |
//! |------|--------|
//! | `get_seasonal_products` | [`seasonal`] |
//! | `calculate_food_cost`, `calculate` | [`cost`] |
//! | `get_reservations` | [`reservations`] |
//! | `menu_database` | [`menu`] |

pub mod cost;
pub mod menu;
pub mod reservations;
pub mod seasonal;

mod schema;

pub use menu::{Dish, MenuDatabase, MenuQuery};
pub use schema::JsonSchemaToolConverter;

use brigade_domain::{RegistryError, ToolRegistry};

/// Registry holding every kitchen tool
pub fn kitchen_registry() -> Result<ToolRegistry, RegistryError> {
    ToolRegistry::new()
        .with_tool(seasonal::descriptor())?
        .with_tool(cost::food_cost_descriptor())?
        .with_tool(reservations::descriptor())?
        .with_tool(MenuDatabase::default().descriptor())?
        .with_tool(cost::calculate_descriptor())
}

/// Tools for the service-side assistant: menu search and arithmetic
pub fn service_registry() -> Result<ToolRegistry, RegistryError> {
    ToolRegistry::new()
        .with_tool(MenuDatabase::default().descriptor())?
        .with_tool(cost::calculate_descriptor())
}

/// Tools for the back-of-house assistant: seasons, costs, bookings
pub fn back_office_registry() -> Result<ToolRegistry, RegistryError> {
    ToolRegistry::new()
        .with_tool(seasonal::descriptor())?
        .with_tool(cost::food_cost_descriptor())?
        .with_tool(reservations::descriptor())
}
