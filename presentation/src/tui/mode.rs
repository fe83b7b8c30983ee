//! TUI mode system (vim-like mode switching)
//!
//! - Normal mode: navigation, timeline and turn commands
//! - Insert mode: composing the message

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application mode (vim-like)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation and commands
    #[default]
    Normal,
    /// Text input
    Insert,
}

impl Mode {
    /// Mode indicator string for the status line
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Self::Normal => Color::Blue,
            Self::Insert => Color::Green,
        }
    }
}

/// User action derived from key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EnterInsert,
    ExitToNormal,
    /// Send the composed message
    Submit,
    InsertNewline,
    InsertChar(char),
    DeleteChar,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    /// Expand or collapse the selected turn's research timeline
    ToggleTimeline,
    PrevTimelineRow,
    NextTimelineRow,
    ToggleTimelineRow,
    PrevTurn,
    NextTurn,
    CopyResponse,
    CycleEffort,
    NextModel,
    PrevModel,
    CancelTurn,
    NewConversation,
    ShowHelp,
    Quit,
    None,
}

/// Key event handler - maps key events to actions based on current mode
pub struct KeyHandler;

impl KeyHandler {
    pub fn handle(mode: Mode, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match mode {
            Mode::Normal => Self::handle_normal(key),
            Mode::Insert => Self::handle_insert(key),
        }
    }

    fn handle_normal(key: KeyEvent) -> Action {
        // Shifted symbols ('G', '?', '<', ...) arrive with SHIFT on some terminals
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return Action::None;
        }
        match key.code {
            KeyCode::Char('i') | KeyCode::Char('a') => Action::EnterInsert,
            KeyCode::Char('q') => Action::Quit,

            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('g') => Action::ScrollToTop,
            KeyCode::Char('G') => Action::ScrollToBottom,

            KeyCode::Char('t') => Action::ToggleTimeline,
            KeyCode::Char('<') => Action::PrevTimelineRow,
            KeyCode::Char('>') => Action::NextTimelineRow,
            KeyCode::Enter => Action::ToggleTimelineRow,

            KeyCode::Char('[') => Action::PrevTurn,
            KeyCode::Char(']') => Action::NextTurn,
            KeyCode::Char('y') => Action::CopyResponse,

            KeyCode::Char('e') => Action::CycleEffort,
            KeyCode::Char('m') => Action::NextModel,
            KeyCode::Char('M') => Action::PrevModel,

            KeyCode::Char('x') | KeyCode::Esc => Action::CancelTurn,
            KeyCode::Char('N') => Action::NewConversation,

            KeyCode::Char('?') => Action::ShowHelp,
            _ => Action::None,
        }
    }

    fn handle_insert(key: KeyEvent) -> Action {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Action::ExitToNormal,
            (KeyCode::Enter, m) if m.contains(KeyModifiers::ALT) => Action::InsertNewline,
            (KeyCode::Enter, _) => Action::Submit,
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::Submit,
            (KeyCode::Char(_), m) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                Action::None
            }
            (KeyCode::Char(c), _) => Action::InsertChar(c),
            (KeyCode::Backspace, _) => Action::DeleteChar,
            (KeyCode::Left, _) => Action::CursorLeft,
            (KeyCode::Right, _) => Action::CursorRight,
            (KeyCode::Home, _) => Action::CursorStart,
            (KeyCode::End, _) => Action::CursorEnd,
            _ => Action::None,
        }
    }
}
