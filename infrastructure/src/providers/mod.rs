//! Completion provider adapters
//!
//! Network transports are out of scope; [`ReplayProvider`] answers from a
//! recorded script so every flow can run offline and deterministically.

mod replay;

pub use replay::{ReplayEntry, ReplayProvider};
