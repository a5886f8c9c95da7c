//! Provider response domain.
//!
//! - [`response::LlmResponse`]: what a completion provider returns
//! - [`response::NextAction`]: the loop's reading of a response

pub mod response;

pub use response::{ContentBlock, LlmResponse, NextAction, StopReason};
