//! menu_database: stateful search over the restaurant menu
//!
//! The handler owns its menu. Filters combine: category (substring,
//! case-insensitive), maximum price, and one allergen or diet to exclude.
//! `viande`, `vegetarien` and `végétarien` also drop meat and fish dishes.

use async_trait::async_trait;
use brigade_domain::{
    ParamType, ToolArguments, ToolDefinition, ToolDescriptor, ToolError, ToolHandler,
    ToolParameter,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

pub const MENU_DATABASE: &str = "menu_database";

const NO_MATCH: &str = "Aucun plat ne correspond à vos critères.";
const VEGETARIAN_KEYWORDS: [&str; 3] = ["viande", "vegetarien", "végétarien"];
const MEAT_OR_FISH: [&str; 4] = ["boeuf", "burger", "steak", "saumon"];

/// One menu entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub price: f64,
    pub prep: String,
    pub allergens: Vec<String>,
    pub category: String,
}

impl Dish {
    fn new(name: &str, price: f64, prep: &str, allergens: &[&str], category: &str) -> Self {
        Self {
            name: name.to_string(),
            price,
            prep: prep.to_string(),
            allergens: allergens.iter().map(|a| a.to_string()).collect(),
            category: category.to_string(),
        }
    }

    fn is_meat_or_fish(&self) -> bool {
        let name = self.name.to_lowercase();
        MEAT_OR_FISH.iter().any(|k| name.contains(k))
    }

    fn render(&self) -> String {
        let allergens = if self.allergens.is_empty() {
            "Aucun".to_string()
        } else {
            self.allergens.join(", ")
        };
        format!(
            "- {} ({}) : {}€ | Allergènes: {}",
            self.name, self.category, self.price, allergens
        )
    }
}

/// Search criteria; `None` means "no constraint"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub max_price: Option<f64>,
    pub exclude_allergen: Option<String>,
}

impl MenuQuery {
    fn from_arguments(arguments: &ToolArguments) -> Self {
        let text = |key: &str| {
            arguments
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase)
        };
        Self {
            category: text("category"),
            max_price: arguments.get("max_price").and_then(|v| v.as_f64()),
            exclude_allergen: text("exclude_allergen"),
        }
    }

    fn matches(&self, dish: &Dish) -> bool {
        if let Some(category) = &self.category
            && !dish.category.to_lowercase().contains(category.as_str())
        {
            return false;
        }
        if let Some(max) = self.max_price
            && dish.price > max
        {
            return false;
        }
        if let Some(excluded) = &self.exclude_allergen {
            if dish.allergens.iter().any(|a| a.to_lowercase() == *excluded) {
                return false;
            }
            if VEGETARIAN_KEYWORDS.contains(&excluded.as_str()) && dish.is_meat_or_fish() {
                return false;
            }
        }
        true
    }
}

/// In-memory menu behind the `menu_database` tool
#[derive(Debug)]
pub struct MenuDatabase {
    dishes: RwLock<Vec<Dish>>,
}

impl Default for MenuDatabase {
    fn default() -> Self {
        Self::new(default_menu())
    }
}

impl MenuDatabase {
    pub fn new(dishes: Vec<Dish>) -> Self {
        Self {
            dishes: RwLock::new(dishes),
        }
    }

    pub fn add(&self, dish: Dish) -> Result<(), ToolError> {
        self.dishes
            .write()
            .map_err(|_| ToolError::execution_failed("menu lock poisoned"))?
            .push(dish);
        Ok(())
    }

    pub fn search(&self, query: &MenuQuery) -> Result<Vec<Dish>, ToolError> {
        let dishes = self
            .dishes
            .read()
            .map_err(|_| ToolError::execution_failed("menu lock poisoned"))?;
        Ok(dishes.iter().filter(|d| query.matches(d)).cloned().collect())
    }

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            MENU_DATABASE,
            "Recherche des plats dans le menu selon des critères (catégorie, prix max, allergènes à exclure).",
        )
        .with_parameter(ToolParameter::new(
            "category",
            "La catégorie du plat (entrée, plat, dessert, boisson). Optionnel.",
            false,
        ))
        .with_parameter(
            ToolParameter::new("max_price", "Prix maximum par plat. Optionnel.", false)
                .with_type(ParamType::Number),
        )
        .with_parameter(ToolParameter::new(
            "exclude_allergen",
            "Allergène à éviter (ex: 'gluten', 'fruits à coque', 'viande' pour végétarien). Optionnel.",
            false,
        ))
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor::new(Self::definition(), self)
    }
}

#[async_trait]
impl ToolHandler for MenuDatabase {
    async fn call(&self, arguments: ToolArguments) -> Result<String, ToolError> {
        let results = self.search(&MenuQuery::from_arguments(&arguments))?;
        if results.is_empty() {
            return Ok(NO_MATCH.to_string());
        }
        Ok(results
            .iter()
            .map(Dish::render)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// The restaurant's standard menu
pub fn default_menu() -> Vec<Dish> {
    vec![
        Dish::new("Salade César", 12.0, "10min", &["gluten", "lait"], "entrée"),
        Dish::new("Soupe à l'oignon", 9.0, "15min", &["gluten"], "entrée"),
        Dish::new("Carpaccio de Boeuf", 14.0, "10min", &[], "entrée"),
        Dish::new("Burger Classique", 18.0, "20min", &["gluten", "lait", "oeuf"], "plat"),
        Dish::new("Risotto aux Champignons", 19.0, "25min", &["lait"], "plat"),
        Dish::new("Pavé de Saumon", 22.0, "20min", &["poisson"], "plat"),
        Dish::new("Curry de Légumes (Vegan)", 16.0, "20min", &[], "plat"),
        Dish::new("Steak Frites", 24.0, "15min", &[], "plat"),
        Dish::new("Fondant au Chocolat", 8.0, "15min", &["gluten", "lait", "oeuf"], "dessert"),
        Dish::new("Salade de Fruits", 7.0, "10min", &[], "dessert"),
        Dish::new("Sorbet Citron", 6.0, "5min", &[], "dessert"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: serde_json::Value) -> ToolArguments {
        value.as_object().cloned().unwrap()
    }

    fn names(db: &MenuDatabase, query: MenuQuery) -> Vec<String> {
        db.search(&query).unwrap().into_iter().map(|d| d.name).collect()
    }

    #[test]
    fn test_filter_category_and_price() {
        let db = MenuDatabase::default();
        let cheap_desserts = names(
            &db,
            MenuQuery {
                category: Some("dessert".to_string()),
                max_price: Some(7.0),
                ..Default::default()
            },
        );
        assert_eq!(cheap_desserts, vec!["Salade de Fruits", "Sorbet Citron"]);
    }

    #[test]
    fn test_vegetarian_excludes_meat_and_fish() {
        let db = MenuDatabase::default();
        let mains = names(
            &db,
            MenuQuery {
                category: Some("plat".to_string()),
                exclude_allergen: Some("vegetarien".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(mains, vec!["Risotto aux Champignons", "Curry de Légumes (Vegan)"]);
    }

    #[tokio::test]
    async fn test_handler_renders_lines() {
        let db = MenuDatabase::default();
        let out = db
            .call(args(json!({"category": "Entrée", "exclude_allergen": "gluten"})))
            .await
            .unwrap();
        assert_eq!(
            out,
            "- Carpaccio de Boeuf (entrée) : 14€ | Allergènes: Aucun"
        );
    }

    #[tokio::test]
    async fn test_handler_no_match() {
        let db = MenuDatabase::default();
        let out = db.call(args(json!({"max_price": 5}))).await.unwrap();
        assert_eq!(out, NO_MATCH);
    }

    #[tokio::test]
    async fn test_state_is_shared_across_calls() {
        let db = MenuDatabase::new(vec![]);
        db.add(Dish::new("Tarte Tatin", 9.0, "40min", &["gluten"], "dessert"))
            .unwrap();
        let out = db.call(ToolArguments::new()).await.unwrap();
        assert!(out.starts_with("- Tarte Tatin (dessert) : 9€"));
    }
}
