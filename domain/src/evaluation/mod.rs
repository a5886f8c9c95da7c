//! Evaluation domain
//!
//! Dataset items, named scores, and the two pure scorers: rule-based term
//! checks and LLM-judge reply parsing.

pub mod entities;
pub mod judge;
pub mod rules;

pub use entities::{DatasetItem, ExperimentReport, ItemReport, Score};
pub use judge::{DEFAULT_JUDGE_CRITERIA, parse_judge_scores};
pub use rules::{INCLUSION_SCORE, SAFETY_SCORE, rule_scores};
