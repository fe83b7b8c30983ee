//! Header widget: backend, provider and turn status

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct HeaderWidget<'a> {
    state: &'a TuiState,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for HeaderWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (status, status_color) = if self.state.conversation.is_in_progress() {
            ("Researching", Color::Yellow)
        } else {
            ("Ready", Color::Green)
        };

        let mut spans = vec![
            Span::styled("◉ ", Style::default().fg(status_color)),
            Span::styled(
                status,
                Style::default()
                    .fg(status_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                self.state.backend_label.as_str(),
                Style::default().fg(Color::White),
            ),
        ];

        if let Some(provider) = &self.state.provider {
            let (key_text, key_color) = if provider.has_api_key {
                ("key ✓", Color::Green)
            } else {
                ("no key", Color::Red)
            };
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                provider.active_provider.as_str(),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(key_text, Style::default().fg(key_color)));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" scout ")
            .style(Style::default().fg(Color::White));

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}
