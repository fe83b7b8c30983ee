//! Agent backend port
//!
//! Defines how the application starts a turn on the research agent and
//! receives its streamed progress.

use async_trait::async_trait;
use scout_domain::{Message, TurnEvent, TurnRequest};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Errors that can occur while starting a turn
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Handle for receiving the events of one running turn.
///
/// The stream ends after a terminal [`TurnEvent`] or when the sender is
/// dropped.
pub struct TurnStream {
    pub receiver: mpsc::Receiver<TurnEvent>,
}

impl TurnStream {
    pub fn new(receiver: mpsc::Receiver<TurnEvent>) -> Self {
        Self { receiver }
    }

    pub async fn next(&mut self) -> Option<TurnEvent> {
        self.receiver.recv().await
    }

    /// Drain the stream into a vector, stopping after the first terminal event.
    ///
    /// A stream that closes without a terminal event is reported as completed.
    pub async fn collect(mut self) -> Vec<TurnEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.receiver.recv().await {
            let terminal = event.is_terminal();
            events.push(event);
            if terminal {
                return events;
            }
        }
        events.push(TurnEvent::Completed);
        events
    }
}

/// The research agent
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Start a turn.
    ///
    /// `history` is the full conversation including the new human message.
    /// Cancelling `cancel` must end the stream with [`TurnEvent::Cancelled`].
    async fn start_turn(
        &self,
        history: &[Message],
        request: &TurnRequest,
        cancel: CancellationToken,
    ) -> Result<TurnStream, BackendError>;
}
