//! Submit a user message and start the agent turn.

use crate::ports::agent_backend::{AgentBackend, BackendError, TurnStream};
use scout_domain::{DomainError, Effort, Message, MessageId, TurnRequest};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SubmitTurnError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl SubmitTurnError {
    /// Blank input: the caller should do nothing at all
    pub fn is_empty_submission(&self) -> bool {
        matches!(self, SubmitTurnError::Invalid(e) if e.is_empty_submission())
    }
}

/// A validated submission, ready to be shown and sent
#[derive(Debug, Clone)]
pub struct PreparedTurn {
    pub request: TurnRequest,
    /// The human message to append to the conversation
    pub message: Message,
}

pub struct SubmitTurnUseCase<B: AgentBackend + ?Sized> {
    backend: Arc<B>,
}

impl<B: AgentBackend + ?Sized> SubmitTurnUseCase<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Validate the input and mint the human message.
    ///
    /// Blank input is rejected here, before anything is dispatched.
    pub fn prepare(
        text: &str,
        effort: Effort,
        model: &str,
    ) -> Result<PreparedTurn, SubmitTurnError> {
        let request = TurnRequest::new(text, effort, model)?;
        let message = Message::human(MessageId::generate(), request.text());
        Ok(PreparedTurn { request, message })
    }

    /// Start a prepared turn. `history` must already end with its message.
    pub async fn start(
        &self,
        history: &[Message],
        request: &TurnRequest,
        cancel: CancellationToken,
    ) -> Result<TurnStream, SubmitTurnError> {
        let effort = request.effort();
        let budget = effort.budget();
        info!(
            "Starting turn: effort={} model={} queries={} loops={}",
            effort,
            request.model(),
            budget.initial_search_query_count,
            budget.max_research_loops
        );
        debug!("History length: {}", history.len());

        Ok(self.backend.start_turn(history, request, cancel).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scout_domain::TurnEvent;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<(usize, TurnRequest)>>,
        fail: bool,
    }

    #[async_trait]
    impl AgentBackend for RecordingBackend {
        async fn start_turn(
            &self,
            history: &[Message],
            request: &TurnRequest,
            _cancel: CancellationToken,
        ) -> Result<TurnStream, BackendError> {
            self.calls
                .lock()
                .unwrap()
                .push((history.len(), request.clone()));
            if self.fail {
                return Err(BackendError::Connection("refused".into()));
            }
            let (tx, rx) = mpsc::channel(4);
            tx.send(TurnEvent::Completed).await.unwrap();
            Ok(TurnStream::new(rx))
        }
    }

    #[test]
    fn test_blank_submission_is_rejected_before_dispatch() {
        let err =
            SubmitTurnUseCase::<RecordingBackend>::prepare("   \n", Effort::Medium, "models/x")
                .err()
                .unwrap();
        assert!(err.is_empty_submission());
    }

    #[tokio::test]
    async fn test_submission_sends_history_and_message() {
        let backend = Arc::new(RecordingBackend::default());
        let use_case = SubmitTurnUseCase::new(backend.clone());
        let history = vec![
            Message::human(MessageId::new("h0"), "earlier"),
            Message::ai(MessageId::new("a0"), "answer"),
        ];

        let prepared = SubmitTurnUseCase::<RecordingBackend>::prepare(
            "  What is 2+2?  ",
            Effort::High,
            "models/gemini-2.5-pro",
        )
        .unwrap();
        assert!(prepared.message.is_human());
        assert_eq!(prepared.message.content(), "What is 2+2?");

        let mut messages = history.clone();
        messages.push(prepared.message.clone());
        let stream = use_case
            .start(&messages, &prepared.request, CancellationToken::new())
            .await
            .unwrap();

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, 3);
        assert_eq!(calls[0].1.effort(), Effort::High);
        assert_eq!(calls[0].1.model(), "models/gemini-2.5-pro");
        drop(calls);

        let events = stream.collect().await;
        assert_eq!(events, vec![TurnEvent::Completed]);
    }

    #[test]
    fn test_prepare_trims_and_mints_message() {
        let prepared =
            SubmitTurnUseCase::<RecordingBackend>::prepare(" hi ", Effort::Low, "m").unwrap();
        assert_eq!(prepared.request.text(), "hi");
        assert_eq!(prepared.message.content(), "hi");
        assert!(prepared.message.is_human());
    }

    #[tokio::test]
    async fn test_backend_error_is_propagated() {
        let backend = Arc::new(RecordingBackend {
            fail: true,
            ..Default::default()
        });
        let use_case = SubmitTurnUseCase::new(backend);
        let request = TurnRequest::new("hi", Effort::Low, "m").unwrap();
        let err = use_case
            .start(&[], &request, CancellationToken::new())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, SubmitTurnError::Backend(_)));
        assert!(!err.is_empty_submission());
    }
}
