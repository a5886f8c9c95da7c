//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod agent_tool;
pub mod plan_and_execute;
pub mod run_conversation;
pub mod run_experiment;
pub(crate) mod shared;
pub mod structured_call;
