//! Conversation domain
//!
//! - [`Transcript`]: append-only turn history with tool-result correlation
//! - [`AssistantTurn`]: versioned assistant turn value type
//! - [`LoopOutcome`]: terminal state of a run

pub mod outcome;
pub mod transcript;

pub use outcome::LoopOutcome;
pub use transcript::{ASSISTANT_TURN_VERSION, AssistantTurn, Transcript, TranscriptError, Turn};
