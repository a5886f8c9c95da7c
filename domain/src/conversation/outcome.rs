//! Terminal state of a conversation run

use super::transcript::Transcript;

/// Result of one loop run.
///
/// `Exhausted` is not an error: the caller decides whether running out of
/// budget should surface as a failure or fall back to the last assistant text.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopOutcome {
    Completed(String),
    Exhausted(Transcript),
}

impl LoopOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, LoopOutcome::Completed(_))
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            LoopOutcome::Completed(text) => Some(text),
            LoopOutcome::Exhausted(_) => None,
        }
    }

    /// Final answer, or the last assistant content of an exhausted run
    pub fn best_effort_answer(&self) -> Option<&str> {
        match self {
            LoopOutcome::Completed(text) => Some(text),
            LoopOutcome::Exhausted(transcript) => transcript.last_assistant_content(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::transcript::AssistantTurn;

    #[test]
    fn test_completed() {
        let outcome = LoopOutcome::Completed("Serve the risotto.".to_string());
        assert!(outcome.is_completed());
        assert_eq!(outcome.answer(), Some("Serve the risotto."));
    }

    #[test]
    fn test_exhausted_best_effort() {
        let mut transcript = Transcript::start("sys", "task");
        transcript
            .push_assistant(AssistantTurn::new("Partial menu drafted", vec![]))
            .unwrap();
        let outcome = LoopOutcome::Exhausted(transcript);
        assert!(!outcome.is_completed());
        assert_eq!(outcome.answer(), None);
        assert_eq!(outcome.best_effort_answer(), Some("Partial menu drafted"));
    }
}
