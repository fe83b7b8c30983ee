//! LangGraph run-stream backend
//!
//! Each turn is a stateless `POST /runs/stream` carrying the whole message
//! history. The SSE response is decoded with `eventsource-stream` on a spawned task and forwarded as
//! [`TurnEvent`]s until a terminal event, stream end or cancellation.

use super::translate::{frame_to_events, message_to_value};
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use scout_application::ports::agent_backend::{AgentBackend, BackendError, TurnStream};
use scout_domain::{Message, TurnEvent, TurnRequest};
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct LangGraphBackend {
    client: reqwest::Client,
    base_url: String,
    assistant_id: String,
}

impl LangGraphBackend {
    /// The client has no overall timeout: research runs take minutes.
    pub fn new(base_url: impl Into<String>, assistant_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            assistant_id: assistant_id.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// JSON body for a run
    pub fn run_body(&self, history: &[Message], request: &TurnRequest) -> Value {
        let budget = request.effort().budget();
        json!({
            "assistant_id": self.assistant_id,
            "input": {
                "messages": history.iter().map(message_to_value).collect::<Vec<_>>(),
                "initial_search_query_count": budget.initial_search_query_count,
                "max_research_loops": budget.max_research_loops,
                "reasoning_model": request.model(),
            },
            "stream_mode": ["values", "updates"],
            "on_disconnect": "cancel",
        })
    }
}

#[async_trait]
impl AgentBackend for LangGraphBackend {
    async fn start_turn(
        &self,
        history: &[Message],
        request: &TurnRequest,
        cancel: CancellationToken,
    ) -> Result<TurnStream, BackendError> {
        let url = format!("{}/runs/stream", self.base_url);
        let body = self.run_body(history, request);
        debug!("POST {}", url);

        let send = self.client.post(&url).json(&body).send();
        let response = tokio::select! {
            _ = cancel.cancelled() => {
                let (tx, rx) = mpsc::channel(1);
                let _ = tx.send(TurnEvent::Cancelled).await;
                return Ok(TurnStream::new(rx));
            }
            result = send => result.map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout
                } else {
                    BackendError::Connection(e.to_string())
                }
            })?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::Http {
                status: status.as_u16(),
                body,
            });
        }

        info!("Run stream opened ({})", status);
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(pump(response.bytes_stream(), tx, cancel));
        Ok(TurnStream::new(rx))
    }
}

/// Forward decoded events until the turn ends. Always sends exactly one
/// terminal event unless the receiver is gone.
async fn pump<S, B, E>(stream: S, tx: mpsc::Sender<TurnEvent>, cancel: CancellationToken)
where
    S: futures::Stream<Item = Result<B, E>> + Send,
    B: AsRef<[u8]> + Send,
    E: std::fmt::Display + Send,
{
    let mut events = std::pin::pin!(stream.eventsource());

    loop {
        let next = tokio::select! {
            _ = cancel.cancelled() => {
                info!("Turn cancelled");
                let _ = tx.send(TurnEvent::Cancelled).await;
                return;
            }
            next = events.next() => next,
        };

        let event = match next {
            Some(Ok(event)) => event,
            Some(Err(e)) => {
                warn!("Run stream failed: {}", e);
                let _ = tx.send(TurnEvent::Failed(e.to_string())).await;
                return;
            }
            None => {
                debug!("Run stream closed");
                let _ = tx.send(TurnEvent::Completed).await;
                return;
            }
        };

        for turn_event in frame_to_events(&event.event, &event.data) {
            let terminal = turn_event.is_terminal();
            if tx.send(turn_event).await.is_err() {
                debug!("Turn receiver dropped");
                return;
            }
            if terminal {
                return;
            }
        }
    }
}
