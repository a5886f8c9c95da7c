//! Dataset loader for the experiment runner
//!
//! Accepts a JSON array of items or an object with `name` and `items`.
//! Items without an `id` are numbered by position (`item-1`, `item-2`, ...).

use crate::error::{LoadError, read_json};
use brigade_domain::DatasetItem;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// A named list of dataset items
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: Option<String>,
    pub items: Vec<DatasetItem>,
}

#[derive(Deserialize)]
struct RawItem {
    id: Option<String>,
    input: serde_json::Value,
    #[serde(default)]
    expected_output: serde_json::Value,
    #[serde(default)]
    metadata: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDataset {
    List(Vec<RawItem>),
    Named {
        name: Option<String>,
        items: Vec<RawItem>,
    },
}

/// Load a dataset file. A dataset without items is rejected.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let (name, raw) = match read_json::<RawDataset>(path)? {
        RawDataset::List(items) => (None, items),
        RawDataset::Named { name, items } => (name, items),
    };
    if raw.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let items: Vec<DatasetItem> = raw
        .into_iter()
        .enumerate()
        .map(|(i, item)| DatasetItem {
            id: item.id.unwrap_or_else(|| format!("item-{}", i + 1)),
            input: item.input,
            expected_output: item.expected_output,
            metadata: item.metadata,
        })
        .collect();

    debug!("Loaded dataset {} ({} items)", path.display(), items.len());
    Ok(Dataset { name, items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_named_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menus.json");
        fs::write(
            &path,
            r#"{
                "name": "chefbot-menu-eval",
                "items": [
                    {
                        "input": {"constraints": "Allergie sévère aux arachides et sésame"},
                        "expected_output": {"must_avoid": ["cacahuètes", "tahin"]},
                        "metadata": {"category": "allergy"}
                    },
                    {"id": "vegan", "input": "Vegan, sans gluten"}
                ]
            }"#,
        )
        .unwrap();

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.name.as_deref(), Some("chefbot-menu-eval"));
        assert_eq!(dataset.items.len(), 2);
        assert_eq!(dataset.items[0].id, "item-1");
        assert_eq!(
            dataset.items[0].input_text(),
            "Allergie sévère aux arachides et sésame"
        );
        assert_eq!(dataset.items[0].metadata["category"], "allergy");
        assert_eq!(dataset.items[1].id, "vegan");
        assert!(dataset.items[1].expected_output.is_null());
    }

    #[test]
    fn test_load_plain_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        fs::write(&path, r#"[{"id": "a", "input": "Dessert pas cher"}]"#).unwrap();
        let dataset = load_dataset(&path).unwrap();
        assert!(dataset.name.is_none());
        assert_eq!(dataset.items[0].input_text(), "Dessert pas cher");
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, r#"{"name": "nothing", "items": []}"#).unwrap();
        assert!(matches!(load_dataset(&path), Err(LoadError::Empty { .. })));
    }
}
