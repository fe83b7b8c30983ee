//! TUI application: main loop with Actor pattern
//!
//! Architecture:
//! ```text
//! TuiApp (select! loop)                 controller_task (tokio::spawn)
//!   ├─ crossterm EventStream              ├─ cmd_rx.recv()
//!   ├─ event_rx (TuiEvent)                └─ run_turn (per turn, JoinSet)
//!   ├─ reveal deadline                          └── event_tx ──┐
//!   └─ tick_interval                                            │
//!        └── cmd_tx ──────────────────>──┘   <──────────────────┘
//! ```

use super::controller::controller_task;
use super::event::{TuiCommand, TuiEvent};
use super::mode::{Action, KeyHandler, Mode};
use super::state::{TuiOptions, TuiState};
use super::widgets::{
    MainLayout, header::HeaderWidget, help::HelpWidget, input::InputWidget,
    message_list::MessageListWidget, status_bar::StatusBarWidget,
};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::stream::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use scout_application::{
    AgentBackend, ClipboardPort, CopyResponseUseCase, LoadModelsUseCase, ModelCatalog,
    SubmitTurnUseCase, TranscriptEntry, TranscriptLogger,
};
use scout_domain::SettledTurn;
use serde_json::json;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Main TUI application
pub struct TuiApp {
    // -- Actor channels --
    cmd_tx: mpsc::UnboundedSender<TuiCommand>,
    event_rx: mpsc::UnboundedReceiver<TuiEvent>,

    copy: CopyResponseUseCase,
    transcript: Arc<dyn TranscriptLogger>,
    tick: Duration,
    state: TuiState,

    // -- Background task handles --
    _controller_handle: tokio::task::JoinHandle<()>,
    _models_handle: tokio::task::JoinHandle<()>,
}

impl TuiApp {
    /// Create the application and start its background tasks.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(
        backend: Arc<dyn AgentBackend>,
        catalog: Arc<dyn ModelCatalog>,
        clipboard: Arc<dyn ClipboardPort>,
        transcript: Arc<dyn TranscriptLogger>,
        options: TuiOptions,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<TuiCommand>();
        let (event_tx, event_rx) = mpsc::unbounded_channel::<TuiEvent>();

        let submit = Arc::new(SubmitTurnUseCase::new(backend));
        let controller_handle = tokio::spawn(controller_task(submit, cmd_rx, event_tx.clone()));

        let load_models = LoadModelsUseCase::new(catalog);
        let models_handle = tokio::spawn(async move {
            let loaded = load_models.execute().await;
            let _ = event_tx.send(TuiEvent::ModelsLoaded(loaded));
        });

        Self {
            cmd_tx,
            event_rx,
            copy: CopyResponseUseCase::new(clipboard),
            transcript,
            tick: options.tick,
            state: TuiState::new(options),
            _controller_handle: controller_handle,
            _models_handle: models_handle,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(info);
        }));

        let mut event_stream = EventStream::new();
        let mut tick = tokio::time::interval(self.tick);

        loop {
            // Render
            terminal.draw(|frame| render(frame, &self.state))?;

            if self.state.should_quit {
                break;
            }

            let reveal = self.state.reveal_deadline();
            let reveal_sleep = async move {
                match reveal {
                    Some((deadline, epoch)) => {
                        tokio::time::sleep_until(deadline.into()).await;
                        epoch
                    }
                    None => std::future::pending().await,
                }
            };

            // select! on all event sources
            tokio::select! {
                // Terminal events (keyboard, resize)
                Some(Ok(term_event)) = event_stream.next() => {
                    self.handle_terminal_event(term_event);
                }

                // Model list and turn events from background tasks
                Some(event) = self.event_rx.recv() => {
                    self.apply_tui_event(event);
                }

                // Next character of the progressive reveal
                epoch = reveal_sleep => {
                    self.state.fire_reveal(epoch, Instant::now());
                }

                // Flash expiry, copy feedback, spinner
                _ = tick.tick() => {
                    self.state.tick(Instant::now());
                }
            }
        }

        let _ = self.cmd_tx.send(TuiCommand::Quit);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Handle a terminal (crossterm) event
    fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            // Terminal auto-resizes on next draw
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // If help is showing, Esc or ? closes it
        if self.state.show_help {
            if matches!(
                key.code,
                crossterm::event::KeyCode::Esc | crossterm::event::KeyCode::Char('?')
            ) {
                self.state.show_help = false;
            }
            return;
        }

        let action = KeyHandler::handle(self.state.mode, key);
        self.handle_action(action);
    }

    /// Handle a semantic key action
    fn handle_action(&mut self, action: Action) {
        let state = &mut self.state;
        match action {
            Action::None => {}

            // Mode transitions
            Action::EnterInsert => state.mode = Mode::Insert,
            Action::ExitToNormal => state.mode = Mode::Normal,

            // Text editing
            Action::InsertChar(c) => state.insert_char(c),
            Action::InsertNewline => state.insert_newline(),
            Action::DeleteChar => state.delete_char(),
            Action::CursorLeft => state.cursor_left(),
            Action::CursorRight => state.cursor_right(),
            Action::CursorStart => state.cursor_home(),
            Action::CursorEnd => state.cursor_end(),

            Action::Submit => {
                if let Some(cmd) = state.submit() {
                    state.mode = Mode::Normal;
                    self.send(cmd);
                }
            }

            // Scrolling
            Action::ScrollUp => state.scroll_up(),
            Action::ScrollDown => state.scroll_down(),
            Action::ScrollToTop => state.scroll_to_top(),
            Action::ScrollToBottom => state.scroll_to_bottom(),

            // Timeline
            Action::ToggleTimeline => state.toggle_timeline(),
            Action::PrevTimelineRow => state.select_timeline_row(-1),
            Action::NextTimelineRow => state.select_timeline_row(1),
            Action::ToggleTimelineRow => state.toggle_timeline_row(),

            // Turns
            Action::PrevTurn => state.select_prev_turn(),
            Action::NextTurn => state.select_next_turn(),
            Action::CopyResponse => self.copy_selected(),
            Action::CancelTurn => {
                if let Some(cmd) = state.cancel_turn() {
                    self.send(cmd);
                }
            }
            Action::NewConversation => {
                if let Some(cmd) = state.new_conversation() {
                    self.send(cmd);
                }
                self.transcript
                    .log(TranscriptEntry::new("conversation_reset", json!({})));
            }

            // Form
            Action::CycleEffort => state.cycle_effort(),
            Action::NextModel => state.next_model(),
            Action::PrevModel => state.prev_model(),

            // Application
            Action::ShowHelp => state.show_help = !state.show_help,
            Action::Quit => state.should_quit = true,
        }
    }

    fn send(&self, cmd: TuiCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            debug!("Controller task is gone");
        }
    }

    fn copy_selected(&mut self) {
        let Some((id, text)) = self.state.copy_target() else {
            self.state.set_flash("Nothing to copy yet");
            return;
        };
        if self.copy.execute(&text) {
            self.state.mark_copied(id, Instant::now());
        }
    }

    /// Apply an event from a background task to state
    fn apply_tui_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::ModelsLoaded(loaded) => {
                info!("{} models available", loaded.listing.models.len());
                self.state.apply_models(loaded);
            }
            TuiEvent::Turn { turn_id, event } => {
                if let Some(settled) = self.state.apply_turn_event(turn_id, event, Instant::now())
                {
                    self.log_settled(&settled);
                }
            }
        }
    }

    fn log_settled(&self, settled: &SettledTurn) {
        let messages = self.state.conversation.messages();
        let question = messages
            .iter()
            .rev()
            .find(|m| m.is_human())
            .map(|m| m.content());
        let answer = settled
            .archived_under
            .as_ref()
            .or_else(|| messages.last().filter(|m| m.is_ai()).map(|m| m.id()))
            .and_then(|id| messages.iter().find(|m| m.id() == id))
            .map(|m| m.content());
        let steps: Vec<&str> = settled
            .archived_under
            .as_ref()
            .map(|id| {
                self.state
                    .conversation
                    .historical()
                    .get(id)
                    .iter()
                    .map(|e| e.title.as_str())
                    .collect()
            })
            .unwrap_or_default();

        self.transcript.log(TranscriptEntry::new(
            "turn_settled",
            json!({
                "turn_id": self.state.turn_id(),
                "effort": self.state.effort.as_str(),
                "model": self.state.models.current().name,
                "question": question,
                "answer": answer,
                "steps": steps,
                "event_count": settled.event_count,
            }),
        ));
    }
}

/// Render all widgets
fn render(frame: &mut ratatui::Frame, state: &TuiState) {
    let layout = MainLayout::compute(
        frame.area(),
        state.input_line_count() as u16,
        state.max_input_height,
    );

    frame.render_widget(HeaderWidget::new(state), layout.header);
    frame.render_widget(MessageListWidget::new(state), layout.conversation);
    frame.render_widget(InputWidget::new(state), layout.input);
    frame.render_widget(StatusBarWidget::new(state), layout.status_bar);

    if state.show_help {
        let help_area = MainLayout::centered_overlay(60, 80, frame.area());
        frame.render_widget(HelpWidget::new(), help_area);
    }
}
