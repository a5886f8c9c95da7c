//! Plan entities for the plan-and-execute pipeline

use serde::{Deserialize, Serialize};

/// Ordered, non-empty list of step descriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    steps: Vec<String>,
}

impl Plan {
    /// Build a plan. Returns `None` when `steps` is empty or every step is blank.
    pub fn new(steps: Vec<String>) -> Option<Self> {
        let steps: Vec<String> = steps
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if steps.is_empty() {
            None
        } else {
            Some(Self { steps })
        }
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Output of one executed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub step_index: usize,
    pub step: String,
    pub output: String,
}

/// Everything produced by one plan-and-execute run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRunResult {
    pub request: String,
    pub plan: Plan,
    pub step_results: Vec<StepResult>,
    pub final_answer: String,
    /// Parse failures absorbed while obtaining the plan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_retries: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_rejects_empty() {
        assert!(Plan::new(vec![]).is_none());
        assert!(Plan::new(vec!["  ".to_string()]).is_none());
    }

    #[test]
    fn test_plan_trims_and_drops_blank_steps() {
        let plan = Plan::new(vec![
            " List seasonal vegetables ".to_string(),
            String::new(),
            "Draft lunches from leftovers".to_string(),
        ])
        .unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.steps()[0], "List seasonal vegetables");
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_plan_serializes_as_steps() {
        let plan = Plan::new(vec!["a".to_string()]).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json, serde_json::json!({"steps": ["a"]}));
    }
}
