//! Prompt templates for the kitchen assistant flows

use crate::agent::plan::StepResult;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the tool-calling head chef
    pub fn head_chef_system() -> &'static str {
        r#"You are a Head Chef. Use tools to manage the kitchen.
IMPORTANT: Once you have the tool results, you MUST summarize the information in your final response to the user."#
    }

    /// System prompt for producing a step list
    pub fn planner_system() -> &'static str {
        r#"You are a methodical Chef. Break down the task into 3 to 4 logical steps.
RETURN ONLY JSON format: {"steps": ["step description 1", "step description 2", ...]}
Do not add markdown formatting."#
    }

    pub fn planner_user(request: &str) -> String {
        format!("Constraints for the menu: {}", request)
    }

    /// System prompt for executing one plan step
    pub fn step_system() -> &'static str {
        "You are a Chef executing a specific part of menu planning. Be concise and practical."
    }

    /// User prompt for one step, listing the outputs of earlier steps
    pub fn step_user(step: &str, previous: &[StepResult]) -> String {
        let context = previous
            .iter()
            .map(|r| format!("- Previous result ({}): {}", r.step, r.output))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "Previous work:\n{}\n\nCURRENT TASK: {}\nExecute this task now.",
            context, step
        )
    }

    pub fn synthesis_system() -> &'static str {
        "You are a Chef. Based on all the planning steps, generate the final clear presentation."
    }

    pub fn synthesis_user(request: &str, results: &[StepResult]) -> String {
        let data = results
            .iter()
            .map(|r| format!("Step {}: {}", r.step, r.output))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "Customer Constraints: {}\n\nPlanning Data:\n{}\n\nPlease output the final answer nicely formatted.",
            request, data
        )
    }

    /// System prompt for the LLM judge, asking for one score per criterion
    pub fn judge_system(criteria: &[String]) -> String {
        let fields = criteria
            .iter()
            .map(|c| format!("\"{}\": 0.0", c))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            r#"You are an expert food critic evaluating a chef assistant's answer to a customer request.
Score each criterion from 0.0 to 1.0. A violated allergy or dietary constraint scores 0.
Reply ONLY with JSON: {{{}, "explanation": "short justification"}}"#,
            fields
        )
    }

    pub fn judge_user(input: &str, output: &str, expected: &serde_json::Value) -> String {
        format!(
            "Customer request: {}\n\nChef answer: {}\n\nExpected: {}",
            input, output, expected
        )
    }

    /// System prompt for a specialist reached through an agent tool
    pub fn specialist_system(name: &str, description: &str) -> String {
        format!(
            "You are '{}', a kitchen specialist. {}\nUse your tools, then answer concisely.",
            name, description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(step: &str, output: &str) -> StepResult {
        StepResult {
            step_index: 0,
            step: step.to_string(),
            output: output.to_string(),
        }
    }

    #[test]
    fn test_step_user_lists_previous_results() {
        let prompt = PromptTemplate::step_user(
            "Write shopping list",
            &[result("Pick dishes", "Dal, curry")],
        );
        assert!(prompt.contains("- Previous result (Pick dishes): Dal, curry"));
        assert!(prompt.contains("CURRENT TASK: Write shopping list"));
    }

    #[test]
    fn test_synthesis_user() {
        let prompt = PromptTemplate::synthesis_user("Vegan week", &[result("a", "b")]);
        assert!(prompt.starts_with("Customer Constraints: Vegan week"));
        assert!(prompt.contains("Step a: b"));
    }

    #[test]
    fn test_judge_system_lists_criteria() {
        let prompt = PromptTemplate::judge_system(&["budget".to_string(), "coherence".to_string()]);
        assert!(prompt.contains(r#"{"budget": 0.0, "coherence": 0.0, "explanation""#));
    }
}
