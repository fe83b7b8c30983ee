//! Background controller task (Actor pattern)
//!
//! Owns the running turn: starts it through [`SubmitTurnUseCase`], forwards
//! its events to the select! loop tagged with the turn id, and cancels it on
//! request. Starting a new turn cancels the previous one.

use super::event::{TuiCommand, TuiEvent};
use scout_application::{AgentBackend, SubmitTurnUseCase};
use scout_domain::{Message, TurnEvent, TurnRequest};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub(super) async fn controller_task(
    submit: Arc<SubmitTurnUseCase<dyn AgentBackend>>,
    mut cmd_rx: mpsc::UnboundedReceiver<TuiCommand>,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
) {
    let mut tasks = JoinSet::new();
    let mut active: Option<CancellationToken> = None;

    loop {
        tokio::select! {
            biased;

            Some(res) = tasks.join_next() => {
                if let Err(e) = res
                    && !e.is_cancelled()
                {
                    warn!("Turn task panicked: {}", e);
                }
            }

            cmd_opt = cmd_rx.recv() => {
                let Some(cmd) = cmd_opt else {
                    break; // Channel closed
                };

                match cmd {
                    TuiCommand::Submit { turn_id, history, request } => {
                        if let Some(previous) = active.take() {
                            previous.cancel();
                        }
                        let token = CancellationToken::new();
                        active = Some(token.clone());
                        tasks.spawn(run_turn(
                            submit.clone(),
                            turn_id,
                            history,
                            request,
                            token,
                            event_tx.clone(),
                        ));
                    }
                    TuiCommand::Cancel => {
                        if let Some(token) = active.take() {
                            debug!("Cancelling running turn");
                            token.cancel();
                        }
                    }
                    TuiCommand::Quit => break,
                }
            }
        }
    }

    if let Some(token) = active.take() {
        token.cancel();
    }
    tasks.shutdown().await;
}

/// Drive one turn to its terminal event
async fn run_turn(
    submit: Arc<SubmitTurnUseCase<dyn AgentBackend>>,
    turn_id: u64,
    history: Vec<Message>,
    request: TurnRequest,
    cancel: CancellationToken,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
) {
    let send = |event| event_tx.send(TuiEvent::Turn { turn_id, event }).is_ok();

    let mut stream = match submit.start(&history, &request, cancel).await {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Turn {} failed to start: {}", turn_id, e);
            send(TurnEvent::Failed(e.to_string()));
            return;
        }
    };

    while let Some(event) = stream.next().await {
        let terminal = event.is_terminal();
        if !send(event) || terminal {
            return;
        }
    }
    send(TurnEvent::Completed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scout_application::{BackendError, TurnStream};
    use scout_domain::{ActivityEvent, Effort, MessageId};

    /// Emits one activity, then waits for cancellation
    struct HangingBackend;

    #[async_trait]
    impl AgentBackend for HangingBackend {
        async fn start_turn(
            &self,
            _history: &[Message],
            _request: &TurnRequest,
            cancel: CancellationToken,
        ) -> Result<TurnStream, BackendError> {
            let (tx, rx) = mpsc::channel(8);
            tokio::spawn(async move {
                let _ = tx
                    .send(TurnEvent::Activity(ActivityEvent::text("Web Research", "")))
                    .await;
                cancel.cancelled().await;
                let _ = tx.send(TurnEvent::Cancelled).await;
            });
            Ok(TurnStream::new(rx))
        }
    }

    struct DownBackend;

    #[async_trait]
    impl AgentBackend for DownBackend {
        async fn start_turn(
            &self,
            _history: &[Message],
            _request: &TurnRequest,
            _cancel: CancellationToken,
        ) -> Result<TurnStream, BackendError> {
            Err(BackendError::Connection("refused".into()))
        }
    }

    /// Closes without a terminal event
    struct SilentBackend;

    #[async_trait]
    impl AgentBackend for SilentBackend {
        async fn start_turn(
            &self,
            _history: &[Message],
            _request: &TurnRequest,
            _cancel: CancellationToken,
        ) -> Result<TurnStream, BackendError> {
            let (_tx, rx) = mpsc::channel(1);
            Ok(TurnStream::new(rx))
        }
    }

    fn spawn_controller(
        backend: Arc<dyn AgentBackend>,
    ) -> (
        mpsc::UnboundedSender<TuiCommand>,
        mpsc::UnboundedReceiver<TuiEvent>,
        tokio::task::JoinHandle<()>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let submit = Arc::new(SubmitTurnUseCase::new(backend));
        let handle = tokio::spawn(controller_task(submit, cmd_rx, event_tx));
        (cmd_tx, event_rx, handle)
    }

    fn submit_cmd(turn_id: u64) -> TuiCommand {
        let request = TurnRequest::new("What is 2+2?", Effort::Low, "m").unwrap();
        TuiCommand::Submit {
            turn_id,
            history: vec![Message::human(MessageId::new("h1"), "What is 2+2?")],
            request,
        }
    }

    async fn next_turn_event(rx: &mut mpsc::UnboundedReceiver<TuiEvent>) -> (u64, TurnEvent) {
        match rx.recv().await {
            Some(TuiEvent::Turn { turn_id, event }) => (turn_id, event),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_events_are_tagged_and_cancel_reaches_backend() {
        let (cmd_tx, mut event_rx, handle) = spawn_controller(Arc::new(HangingBackend));

        cmd_tx.send(submit_cmd(7)).unwrap();
        let (turn_id, event) = next_turn_event(&mut event_rx).await;
        assert_eq!(turn_id, 7);
        assert!(matches!(event, TurnEvent::Activity(_)));

        cmd_tx.send(TuiCommand::Cancel).unwrap();
        let (turn_id, event) = next_turn_event(&mut event_rx).await;
        assert_eq!(turn_id, 7);
        assert_eq!(event, TurnEvent::Cancelled);

        cmd_tx.send(TuiCommand::Quit).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_new_submit_cancels_previous_turn() {
        let (cmd_tx, mut event_rx, handle) = spawn_controller(Arc::new(HangingBackend));

        cmd_tx.send(submit_cmd(1)).unwrap();
        assert_eq!(next_turn_event(&mut event_rx).await.0, 1);

        cmd_tx.send(submit_cmd(2)).unwrap();
        let mut seen = Vec::new();
        while seen.len() < 2 {
            seen.push(next_turn_event(&mut event_rx).await);
        }
        assert!(seen.contains(&(1, TurnEvent::Cancelled)));
        assert!(seen.iter().any(|(id, e)| *id == 2 && matches!(e, TurnEvent::Activity(_))));

        cmd_tx.send(TuiCommand::Quit).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_start_failure_becomes_failed_event() {
        let (cmd_tx, mut event_rx, handle) = spawn_controller(Arc::new(DownBackend));

        cmd_tx.send(submit_cmd(1)).unwrap();
        let (_, event) = next_turn_event(&mut event_rx).await;
        assert!(matches!(event, TurnEvent::Failed(ref msg) if msg.contains("refused")));

        drop(cmd_tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_stream_completes_turn() {
        let (cmd_tx, mut event_rx, handle) = spawn_controller(Arc::new(SilentBackend));

        cmd_tx.send(submit_cmd(3)).unwrap();
        assert_eq!(next_turn_event(&mut event_rx).await, (3, TurnEvent::Completed));

        cmd_tx.send(TuiCommand::Quit).unwrap();
        handle.await.unwrap();
    }
}
