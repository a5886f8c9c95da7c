//! Prompt domain
//!
//! Templates for the head chef loop, the planner, step execution, synthesis,
//! the judge, and specialist sub-agents.

mod template;

pub use template::PromptTemplate;
