//! Plan-and-execute domain types.
//!
//! - [`Plan`]: a non-empty ordered list of step descriptions
//! - [`StepResult`] / [`PlanRunResult`]: what executing a plan produced
//! - [`parse_plan`]: turns provider text into a [`Plan`]

pub mod plan;
pub mod plan_parser;

pub use plan::{Plan, PlanRunResult, StepResult};
pub use plan_parser::{parse_plan, parse_plan_json};
