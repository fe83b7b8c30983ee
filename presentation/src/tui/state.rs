//! TUI application state
//!
//! Single source of truth for everything the TUI renders. Owned by the
//! TuiApp select! loop; background tasks only reach it through events.

use super::copy::CopyFeedback;
use super::event::TuiCommand;
use super::mode::Mode;
use super::reveal::ProgressiveReveal;
use super::timeline::{TimelineKey, TimelineUiState};
use scout_application::{AgentBackend, ModelsLoaded, SubmitTurnUseCase};
use scout_domain::{
    ActivityEvent, Conversation, Effort, MessageId, ModelSelector, ProviderInfo, RevealStep,
    SettledTurn, TurnEvent,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const FLASH_TTL: Duration = Duration::from_secs(5);

/// Start-up settings for the TUI
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub reveal_delay: Duration,
    pub copied_feedback: Duration,
    pub tick: Duration,
    pub max_input_height: u16,
    pub effort: Effort,
    /// Model to select once the list is known
    pub preferred_model: Option<String>,
    /// Shown in the header
    pub backend_label: String,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_millis(10),
            copied_feedback: Duration::from_millis(2000),
            tick: Duration::from_millis(250),
            max_input_height: 8,
            effort: Effort::default(),
            preferred_model: None,
            backend_label: String::new(),
        }
    }
}

/// Reveal of the most recent AI message
struct ActiveReveal {
    message: MessageId,
    driver: ProgressiveReveal,
}

/// Central TUI state
pub struct TuiState {
    // -- Mode / input --
    pub mode: Mode,
    pub input: String,
    pub cursor_pos: usize,

    // -- Conversation --
    pub conversation: Conversation,
    /// Id of the turn whose events are accepted; bumped on submit and reset
    turn_id: u64,
    /// Selected AI message index; `None` follows the latest
    selected_ai: Option<usize>,
    timelines: HashMap<TimelineKey, TimelineUiState>,
    reveal: Option<ActiveReveal>,
    pub copy_feedback: CopyFeedback,

    // -- Form --
    pub effort: Effort,
    pub models: ModelSelector,
    pub model_source: Option<String>,
    pub provider: Option<ProviderInfo>,
    preferred_model: Option<String>,

    // -- View --
    pub scroll_offset: usize,
    pub auto_scroll: bool,
    pub show_help: bool,
    pub flash_message: Option<(String, Instant)>,
    pub spinner_frame: usize,
    pub max_input_height: u16,
    pub backend_label: String,
    reveal_delay: Duration,

    // -- Lifecycle --
    pub should_quit: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new(TuiOptions::default())
    }
}

impl TuiState {
    pub fn new(options: TuiOptions) -> Self {
        let mut models = ModelSelector::default();
        if let Some(name) = &options.preferred_model {
            models.select_by_name(name);
        }
        Self {
            mode: Mode::default(),
            input: String::new(),
            cursor_pos: 0,
            conversation: Conversation::new(),
            turn_id: 0,
            selected_ai: None,
            timelines: HashMap::new(),
            reveal: None,
            copy_feedback: CopyFeedback::new(options.copied_feedback),
            effort: options.effort,
            models,
            model_source: None,
            provider: None,
            preferred_model: options.preferred_model,
            scroll_offset: 0,
            auto_scroll: true,
            show_help: false,
            flash_message: None,
            spinner_frame: 0,
            max_input_height: options.max_input_height,
            backend_label: options.backend_label,
            reveal_delay: options.reveal_delay,
            should_quit: false,
        }
    }

    // -- Input editing --

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn delete_char(&mut self) {
        if let Some(prev) = self.input[..self.cursor_pos].chars().next_back() {
            self.cursor_pos -= prev.len_utf8();
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor_pos].chars().next_back() {
            self.cursor_pos -= prev.len_utf8();
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(next) = self.input[self.cursor_pos..].chars().next() {
            self.cursor_pos += next.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    /// Number of lines in the input buffer
    pub fn input_line_count(&self) -> usize {
        self.input.split('\n').count()
    }

    fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    // -- Turn lifecycle --

    /// Turn the composed input into a submission.
    ///
    /// Blank input and input sent while a turn runs produce nothing.
    pub fn submit(&mut self) -> Option<TuiCommand> {
        if self.conversation.is_in_progress() {
            self.set_flash("A research turn is already running (x to cancel)");
            return None;
        }
        let model = self.models.current().name.clone();
        let prepared = match SubmitTurnUseCase::<dyn AgentBackend>::prepare(
            &self.input,
            self.effort,
            &model,
        ) {
            Ok(prepared) => prepared,
            Err(e) if e.is_empty_submission() => return None,
            Err(e) => {
                self.set_flash(e.to_string());
                return None;
            }
        };

        self.take_input();
        self.turn_id += 1;
        self.timelines.remove(&TimelineKey::Live);
        self.selected_ai = None;
        self.conversation.begin_turn(prepared.message);
        self.scroll_to_bottom();
        info!("Submitted turn {}", self.turn_id);

        Some(TuiCommand::Submit {
            turn_id: self.turn_id,
            history: self.conversation.messages().to_vec(),
            request: prepared.request,
        })
    }

    /// Apply an event of turn `turn_id`. Events of older turns are dropped.
    ///
    /// Returns the settle summary when the event ended the turn.
    pub fn apply_turn_event(
        &mut self,
        turn_id: u64,
        event: TurnEvent,
        now: Instant,
    ) -> Option<SettledTurn> {
        if turn_id != self.turn_id {
            debug!("Dropping event of stale turn {}", turn_id);
            return None;
        }
        match &event {
            TurnEvent::Failed(reason) => self.set_flash(format!("Research failed: {}", reason)),
            TurnEvent::Cancelled => self.set_flash("Research cancelled"),
            _ => {}
        }

        let settled = self.conversation.apply(event);
        if settled.is_some() {
            self.timelines.remove(&TimelineKey::Live);
        }
        self.sync_reveal(now);
        if self.auto_scroll {
            self.scroll_offset = 0;
        }
        settled
    }

    /// Command to abort the running turn, if one runs
    pub fn cancel_turn(&mut self) -> Option<TuiCommand> {
        if !self.conversation.is_in_progress() {
            return None;
        }
        self.set_flash("Cancelling...");
        Some(TuiCommand::Cancel)
    }

    /// Discard the whole conversation, cancelling a running turn first
    pub fn new_conversation(&mut self) -> Option<TuiCommand> {
        let cancel = self
            .conversation
            .is_in_progress()
            .then_some(TuiCommand::Cancel);
        self.turn_id += 1;
        self.conversation.reset();
        self.timelines.clear();
        self.reveal = None;
        self.selected_ai = None;
        self.copy_feedback.clear();
        self.scroll_to_bottom();
        self.set_flash("New conversation");
        cancel
    }

    // -- Models / effort --

    pub fn apply_models(&mut self, loaded: ModelsLoaded) {
        if loaded.listing.is_fallback() {
            self.set_flash("Model list unavailable, using built-in models");
        }
        self.models.replace(loaded.listing.models);
        if let Some(name) = &self.preferred_model {
            self.models.select_by_name(name);
        }
        self.model_source = Some(loaded.listing.source);
        self.provider = loaded.provider;
    }

    pub fn cycle_effort(&mut self) {
        self.effort = self.effort.next();
    }

    pub fn next_model(&mut self) {
        self.models.select_next();
        self.preferred_model = None;
    }

    pub fn prev_model(&mut self) {
        self.models.select_prev();
        self.preferred_model = None;
    }

    // -- Turn selection --

    /// Index of the selected AI message
    pub fn selected_message_index(&self) -> Option<usize> {
        self.selected_ai
            .filter(|i| self.conversation.messages().get(*i).is_some_and(|m| m.is_ai()))
            .or_else(|| self.conversation.latest_ai_index())
    }

    pub fn select_prev_turn(&mut self) {
        self.step_turn(-1);
    }

    pub fn select_next_turn(&mut self) {
        self.step_turn(1);
    }

    fn step_turn(&mut self, delta: isize) {
        let indices = self.conversation.ai_indices();
        let Some(current) = self.selected_message_index() else {
            return;
        };
        let pos = indices.iter().position(|i| *i == current).unwrap_or(0) as isize;
        let next = (pos + delta).clamp(0, indices.len() as isize - 1) as usize;
        self.selected_ai = indices.get(next).copied();
    }

    // -- Timelines --

    /// Key of the timeline `t` / `<` / `>` / Enter act on
    pub fn selected_timeline(&self) -> Option<(TimelineKey, &[ActivityEvent])> {
        if self.conversation.awaiting_ai_message() {
            return Some((TimelineKey::Live, self.conversation.live_events()));
        }
        let index = self.selected_message_index()?;
        self.timeline_at(index)
    }

    /// Timeline shown above the message at `index`, if it has one
    pub fn timeline_at(&self, index: usize) -> Option<(TimelineKey, &[ActivityEvent])> {
        let (events, live) = self.conversation.timeline_for(index)?;
        if live {
            return Some((TimelineKey::Live, events));
        }
        if events.is_empty() {
            return None;
        }
        let id = self.conversation.messages().get(index)?.id().clone();
        Some((TimelineKey::Message(id), events))
    }

    pub fn timeline_ui(&self, key: &TimelineKey) -> Option<&TimelineUiState> {
        self.timelines.get(key)
    }

    pub fn toggle_timeline(&mut self) {
        let Some(key) = self.selected_timeline().map(|(key, _)| key) else {
            return;
        };
        self.timelines.entry(key).or_default().toggle();
    }

    pub fn select_timeline_row(&mut self, delta: isize) {
        let Some((key, len)) = self
            .selected_timeline()
            .map(|(key, events)| (key, events.len()))
        else {
            return;
        };
        self.timelines.entry(key).or_default().select_row(delta, len);
    }

    /// Expand the timeline, or toggle its selected row once expanded
    pub fn toggle_timeline_row(&mut self) {
        let Some((key, events)) = self
            .selected_timeline()
            .map(|(key, events)| (key, events.to_vec()))
        else {
            return;
        };
        let ui = self.timelines.entry(key).or_default();
        if !ui.is_expanded() {
            ui.toggle();
            return;
        }
        let row = ui.selected_row();
        if !ui.toggle_row(row, &events) {
            self.set_flash("This step has no details");
        }
    }

    // -- Progressive reveal --

    /// Point the reveal at the latest AI message; a new message gets a fresh reveal
    fn sync_reveal(&mut self, now: Instant) {
        let Some(index) = self.conversation.latest_ai_index() else {
            self.reveal = None;
            return;
        };
        let message = &self.conversation.messages()[index];
        let is_current =
            matches!(&self.reveal, Some(active) if &active.message == message.id());
        if !is_current {
            self.reveal = Some(ActiveReveal {
                message: message.id().clone(),
                driver: ProgressiveReveal::new(self.reveal_delay),
            });
        }
        if let Some(active) = &mut self.reveal {
            active.driver.set_target(message.content(), now);
        }
    }

    pub fn reveal_deadline(&self) -> Option<(Instant, u64)> {
        self.reveal.as_ref()?.driver.pending_tick()
    }

    pub fn fire_reveal(&mut self, epoch: u64, now: Instant) {
        if let Some(active) = &mut self.reveal
            && active.driver.fire(epoch, now) == RevealStep::Completed
        {
            debug!("Reveal of {} complete", active.message);
        }
    }

    /// Visible text of a message: the revealed prefix for the latest AI
    /// message, the full content otherwise
    pub fn visible_text(&self, index: usize) -> Option<&str> {
        let message = self.conversation.messages().get(index)?;
        match &self.reveal {
            Some(active) if &active.message == message.id() => Some(active.driver.shown_text()),
            _ => Some(message.content()),
        }
    }

    // -- Copy --

    /// Id and full content of the AI turn `y` copies
    pub fn copy_target(&self) -> Option<(MessageId, String)> {
        let message = self.conversation.messages().get(self.selected_message_index()?)?;
        Some((message.id().clone(), message.content().to_string()))
    }

    pub fn mark_copied(&mut self, id: MessageId, now: Instant) {
        self.copy_feedback.mark(id, now);
    }

    // -- Scrolling --

    pub fn scroll_up(&mut self) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
        } else {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.auto_scroll = false;
        self.scroll_offset = usize::MAX; // Clamped during render
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    // -- Flash / housekeeping --

    pub fn set_flash(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), Instant::now()));
    }

    /// Periodic tick: expire transient feedback and advance the spinner
    pub fn tick(&mut self, now: Instant) {
        if let Some((_, created)) = &self.flash_message
            && now.duration_since(*created) > FLASH_TTL
        {
            self.flash_message = None;
        }
        self.copy_feedback.expire(now);
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub fn turn_id(&self) -> u64 {
        self.turn_id
    }
}
