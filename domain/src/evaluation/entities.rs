//! Evaluation entities: dataset items, scores and reports

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One evaluation case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetItem {
    pub id: String,
    pub input: serde_json::Value,
    #[serde(default)]
    pub expected_output: serde_json::Value,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl DatasetItem {
    pub fn new(id: impl Into<String>, input: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            input,
            expected_output: serde_json::Value::Null,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_expected(mut self, expected: serde_json::Value) -> Self {
        self.expected_output = expected;
        self
    }

    /// The item input as task text.
    ///
    /// A string input is used as-is; an object with a `constraints`,
    /// `question` or `task` field yields that field; anything else is
    /// rendered as JSON.
    pub fn input_text(&self) -> String {
        match &self.input {
            serde_json::Value::String(s) => s.clone(),
            value => ["constraints", "question", "task"]
                .iter()
                .find_map(|k| value.get(k).and_then(|v| v.as_str()))
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string()),
        }
    }
}

/// A named numeric score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Score {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Result of running the task and all evaluators on one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_error: Option<String>,
    #[serde(default)]
    pub scores: Vec<Score>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evaluator_errors: Vec<String>,
}

impl ItemReport {
    pub fn succeeded(&self) -> bool {
        self.task_error.is_none()
    }

    pub fn score(&self, name: &str) -> Option<f64> {
        self.scores.iter().find(|s| s.name == name).map(|s| s.value)
    }
}

/// Aggregated result of an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub name: String,
    pub items: Vec<ItemReport>,
    /// Mean of each score name over the items that produced it
    pub averages: BTreeMap<String, f64>,
}

impl ExperimentReport {
    /// Build a report, computing per-score averages.
    pub fn new(name: impl Into<String>, items: Vec<ItemReport>) -> Self {
        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for score in items.iter().flat_map(|i| i.scores.iter()) {
            let entry = sums.entry(score.name.clone()).or_insert((0.0, 0));
            entry.0 += score.value;
            entry.1 += 1;
        }
        let averages = sums
            .into_iter()
            .map(|(name, (sum, count))| (name, sum / count as f64))
            .collect();

        Self {
            name: name.into(),
            items,
            averages,
        }
    }

    pub fn failed_items(&self) -> usize {
        self.items.iter().filter(|i| !i.succeeded()).count()
    }
}
