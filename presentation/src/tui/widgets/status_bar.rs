//! Status bar widget: mode indicator + key hints + flash messages

use crate::tui::mode::Mode;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBarWidget<'a> {
    state: &'a TuiState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    fn hints(&self) -> &'static str {
        match (self.state.mode, self.state.conversation.is_in_progress()) {
            (Mode::Normal, true) => "x:cancel  t:timeline  j/k:scroll  ?:help",
            (Mode::Normal, false) => "i:ask  y:copy  e:effort  m:model  N:new  ?:help  q:quit",
            (Mode::Insert, _) => "Enter:send  Alt+Enter:newline  Esc:normal",
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(bg_style).set_char(' ');
        }

        let mode = self.state.mode;
        let mode_text = mode.indicator();
        let mode_style = Style::default()
            .fg(Color::Black)
            .bg(mode.color())
            .add_modifier(Modifier::BOLD);

        let mode_line = Line::from(Span::styled(format!(" {} ", mode_text), mode_style));
        let mode_width = mode_text.len() as u16 + 2; // padding
        buf.set_line(area.x, area.y, &mode_line, mode_width);

        // Flash message or key hints on the right
        let right_text = match &self.state.flash_message {
            Some((flash, _)) => flash.clone(),
            None => self.hints().to_string(),
        };
        let right_width = right_text.chars().count() as u16;
        let right_x = area.right().saturating_sub(right_width + 1);
        if right_x > area.x + mode_width {
            let right_line = Line::from(Span::styled(
                right_text,
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
            buf.set_line(right_x, area.y, &right_line, right_width + 1);
        }
    }
}
