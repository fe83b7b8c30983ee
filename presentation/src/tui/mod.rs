//! TUI (Text User Interface) module for scout
//!
//! A single conversation view built with ratatui: message bubbles with
//! their research timelines, the message form, and a status line. Turns
//! run in a background controller task; the select! loop in [`TuiApp`]
//! owns all UI state.

mod app;
mod controller;
mod copy;
mod event;
mod mode;
mod reveal;
mod state;
mod timeline;
mod widgets;

pub use app::TuiApp;
pub use copy::CopyFeedback;
pub use event::{TuiCommand, TuiEvent};
pub use mode::{Action, KeyHandler, Mode};
pub use reveal::ProgressiveReveal;
pub use state::{TuiOptions, TuiState};
pub use timeline::{TimelineKey, TimelineUiState, TimelineView};
pub use widgets::{
    MainLayout, header::HeaderWidget, help::HelpWidget, input::InputWidget,
    message_list::MessageListWidget, status_bar::StatusBarWidget,
};
