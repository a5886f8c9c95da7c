//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ParseError`]: structured output that failed to parse
//! - [`string::preview`]: one-line previews for logs and console output

pub mod error;
pub mod string;
