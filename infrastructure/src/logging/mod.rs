//! Logging infrastructure: structured conversation logging.
//!
//! - [`JsonlConversationLogger`] writes one JSON object per event.
//! - [`BackgroundConversationLogger`] forwards events to another logger from
//!   a tokio task.
//!
//! Both implement the [`ConversationLogger`](brigade_application::ConversationLogger) port.

mod background;
mod jsonl_logger;

pub use background::BackgroundConversationLogger;
pub use jsonl_logger::JsonlConversationLogger;
