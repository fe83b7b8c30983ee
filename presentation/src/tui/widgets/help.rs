//! Help overlay widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const NORMAL_KEYS: &[(&str, &str)] = &[
    ("i / a", "Compose a message"),
    ("j k / ↓ ↑", "Scroll conversation"),
    ("g / G", "Scroll to top / bottom"),
    ("[ / ]", "Select previous / next answer"),
    ("y", "Copy selected answer"),
    ("t", "Expand / collapse research timeline"),
    ("< / >", "Move between timeline steps"),
    ("Enter", "Expand / collapse step details"),
    ("e", "Cycle effort (low, medium, high)"),
    ("m / M", "Next / previous model"),
    ("x / Esc", "Cancel running research"),
    ("N", "New conversation"),
    ("q / Ctrl+C", "Quit"),
];

const INSERT_KEYS: &[(&str, &str)] = &[
    ("Enter / Ctrl+S", "Send"),
    ("Alt+Enter", "New line"),
    ("Esc", "Back to normal mode"),
];

/// Widget for rendering help overlay
#[derive(Default)]
pub struct HelpWidget;

impl HelpWidget {
    pub fn new() -> Self {
        Self
    }

    fn section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(keys.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*desc),
            ])
        }));
        lines.push(Line::from(""));
        lines
    }

    fn build_help_text() -> Vec<Line<'static>> {
        let mut lines = Self::section("Normal mode", NORMAL_KEYS);
        lines.extend(Self::section("Insert mode", INSERT_KEYS));
        lines.push(Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

impl Widget for HelpWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        Paragraph::new(Self::build_help_text())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
