//! Channel-forwarding conversation logger.
//!
//! [`BackgroundConversationLogger::log`] only pushes the event onto an
//! unbounded channel; a tokio task drains the channel into the wrapped
//! logger. Callers never wait on file I/O, and a closed channel drops events
//! silently.

use brigade_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct BackgroundConversationLogger {
    tx: mpsc::UnboundedSender<ConversationEvent>,
}

impl BackgroundConversationLogger {
    /// Spawn the forwarding task on the current runtime.
    ///
    /// The task ends once every clone of the returned logger is dropped;
    /// await the handle to make sure all events reached `inner`.
    pub fn spawn(inner: Arc<dyn ConversationLogger>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<ConversationEvent>();
        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                inner.log(event);
            }
        });
        (Self { tx }, handle)
    }
}

impl ConversationLogger for BackgroundConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<&'static str>>);

    impl ConversationLogger for Collect {
        fn log(&self, event: ConversationEvent) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    #[tokio::test]
    async fn test_events_forwarded_in_order() {
        let sink = Arc::new(Collect::default());
        let (logger, handle) = BackgroundConversationLogger::spawn(sink.clone());

        logger.log(ConversationEvent::new("run_started", serde_json::json!({})));
        logger.log(ConversationEvent::new("tool_call", serde_json::json!({})));
        logger.log(ConversationEvent::new("run_completed", serde_json::json!({})));
        drop(logger);
        handle.await.unwrap();

        assert_eq!(
            *sink.0.lock().unwrap(),
            vec!["run_started", "tool_call", "run_completed"]
        );
    }

    #[tokio::test]
    async fn test_log_after_task_end_is_ignored() {
        let sink = Arc::new(Collect::default());
        let (logger, handle) = BackgroundConversationLogger::spawn(sink.clone());
        handle.abort();
        let _ = handle.await;

        logger.log(ConversationEvent::new("run_started", serde_json::json!({})));
        assert!(sink.0.lock().unwrap().is_empty());
    }
}
