//! A single request/response cycle with the agent

use crate::activity::event::ActivityEvent;
use crate::catalog::effort::Effort;
use crate::conversation::message::Message;
use crate::core::error::DomainError;

/// A validated user submission (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    text: String,
    effort: Effort,
    model: String,
}

impl TurnRequest {
    /// Rejects input that is empty or whitespace only.
    ///
    /// The text is kept as typed apart from surrounding whitespace.
    pub fn new(
        text: impl AsRef<str>,
        effort: Effort,
        model: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptySubmission);
        }
        Ok(Self {
            text: trimmed.to_string(),
            effort,
            model: model.into(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn effort(&self) -> Effort {
        self.effort
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Events pushed by the backend while a turn runs
#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    /// A new step record for the live timeline
    Activity(ActivityEvent),
    /// Full snapshot of the conversation messages
    Messages(Vec<Message>),
    /// The turn finished normally
    Completed,
    /// The turn was aborted by the user
    Cancelled,
    /// The turn failed; the text is shown to the user
    Failed(String),
}

impl TurnEvent {
    /// Whether this event ends the turn
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TurnEvent::Completed | TurnEvent::Cancelled | TurnEvent::Failed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_rejected() {
        assert_eq!(
            TurnRequest::new("", Effort::Medium, "m"),
            Err(DomainError::EmptySubmission)
        );
        assert_eq!(
            TurnRequest::new("  \n\t ", Effort::Medium, "m"),
            Err(DomainError::EmptySubmission)
        );
    }

    #[test]
    fn test_request_keeps_effort_and_model() {
        let request =
            TurnRequest::new(" What is 2+2? ", Effort::High, "models/gemini-2.5-pro").unwrap();
        assert_eq!(request.text(), "What is 2+2?");
        assert_eq!(request.effort(), Effort::High);
        assert_eq!(request.model(), "models/gemini-2.5-pro");
    }

    #[test]
    fn test_terminal_events() {
        assert!(TurnEvent::Completed.is_terminal());
        assert!(TurnEvent::Cancelled.is_terminal());
        assert!(TurnEvent::Failed("boom".into()).is_terminal());
        assert!(!TurnEvent::Messages(vec![]).is_terminal());
    }
}
