//! Application-level configuration.
//!
//! - [`ExecutionParams`]: turn and attempt budgets, timeouts, concurrency

pub mod execution_params;

pub use execution_params::ExecutionParams;
