//! Input widget: the message form
//!
//! Multiline text is split on `\n` and rendered as one `Line` per row.
//! The prompt prefix is shown only on the first line; continuation lines
//! get a "  " indent. The bottom border carries the effort and model
//! selectors.

use crate::tui::mode::Mode;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PROMPT: &str = "> ";
const CONTINUATION: &str = "  ";
const PLACEHOLDER: &str = "Ask anything... (i to type)";

pub struct InputWidget<'a> {
    state: &'a TuiState,
}

impl<'a> InputWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    fn selectors(&self) -> Line<'static> {
        let key = Style::default().fg(Color::DarkGray);
        let value = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled(" effort: ", key),
            Span::styled(self.state.effort.as_str(), value),
            Span::styled(" · model: ", key),
            Span::styled(self.state.models.current().display_name.clone(), value),
            Span::raw(" "),
        ])
    }
}

impl<'a> Widget for InputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let active = state.mode == Mode::Insert;
        let color = if active { Color::Green } else { Color::DarkGray };

        let prompt_span = Span::styled(
            PROMPT,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Ask ")
            .title_bottom(self.selectors().right_aligned())
            .style(Style::default().fg(color));

        let inner_height = area.height.saturating_sub(2) as usize;

        let lines = if active {
            build_active_lines(&state.input, state.cursor_pos, color, &prompt_span)
        } else if state.input.is_empty() {
            vec![Line::from(vec![
                prompt_span,
                Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ])]
        } else {
            build_inactive_lines(&state.input, color, &prompt_span)
        };

        // Keep the cursor line visible
        let cursor_line = find_cursor_line(&state.input, state.cursor_pos);
        let scroll_offset = if lines.len() > inner_height && cursor_line >= inner_height {
            (cursor_line + 1).saturating_sub(inner_height)
        } else {
            0
        };

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll_offset as u16, 0))
            .render(area, buf);
    }
}

fn continuation_span(color: Color) -> Span<'static> {
    Span::styled(
        CONTINUATION,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Build lines for Insert mode with cursor rendering
fn build_active_lines<'a>(
    text: &str,
    cursor_pos: usize,
    color: Color,
    prompt_span: &Span<'a>,
) -> Vec<Line<'a>> {
    let cursor_style = Style::default().fg(Color::Black).bg(color);

    let mut lines = Vec::new();
    let mut byte_offset = 0;

    // split() on "foo\n" gives ["foo", ""], so a trailing newline gets its own row
    for (i, line_text) in text.split('\n').enumerate() {
        let line_start = byte_offset;
        let line_end = line_start + line_text.len();

        let mut spans: Vec<Span<'a>> = vec![if i == 0 {
            prompt_span.clone()
        } else {
            continuation_span(color)
        }];

        if cursor_pos >= line_start && cursor_pos <= line_end {
            let (before, after) = line_text.split_at(cursor_pos - line_start);
            spans.push(Span::raw(before.to_string()));

            let mut rest = after.chars();
            match rest.next() {
                // Cursor at end of line: show block cursor on space
                None => spans.push(Span::styled(" ", cursor_style)),
                Some(ch) => {
                    spans.push(Span::styled(ch.to_string(), cursor_style));
                    if !rest.as_str().is_empty() {
                        spans.push(Span::raw(rest.as_str().to_string()));
                    }
                }
            }
        } else {
            spans.push(Span::raw(line_text.to_string()));
        }

        lines.push(Line::from(spans));
        byte_offset = line_end + 1; // +1 for the '\n'
    }

    lines
}

/// Build lines for Normal mode: no cursor
fn build_inactive_lines<'a>(text: &str, color: Color, prompt_span: &Span<'a>) -> Vec<Line<'a>> {
    let inactive_style = Style::default().fg(color);

    text.split('\n')
        .enumerate()
        .map(|(i, line_text)| {
            let prefix = if i == 0 {
                prompt_span.clone()
            } else {
                continuation_span(color)
            };
            Line::from(vec![
                prefix,
                Span::styled(line_text.to_string(), inactive_style),
            ])
        })
        .collect()
}

/// Which line (0-indexed) the cursor is on
fn find_cursor_line(text: &str, cursor_pos: usize) -> usize {
    text[..cursor_pos.min(text.len())]
        .chars()
        .filter(|&c| c == '\n')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_domain::Effort;

    fn render(state: &TuiState, height: u16) -> String {
        let mut buf = Buffer::empty(Rect::new(0, 0, 70, height));
        InputWidget::new(state).render(buf.area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_placeholder_and_selectors_in_normal_mode() {
        let mut state = TuiState::default();
        state.effort = Effort::High;
        let text = render(&state, 3);
        assert!(text.contains("Ask anything"));
        assert!(text.contains("effort: high"));
        assert!(text.contains(&state.models.current().display_name));
    }

    #[test]
    fn test_multiline_input_in_insert_mode() {
        let mut state = TuiState::default();
        state.mode = Mode::Insert;
        state.input = "first\nsecond".into();
        state.cursor_pos = state.input.len();
        let text = render(&state, 4);
        assert!(text.contains("> first"));
        assert!(text.contains("  second"));
    }

    #[test]
    fn test_active_lines_place_cursor_on_multibyte_char() {
        let prompt = Span::raw(PROMPT);
        let lines = build_active_lines("héllo", 1, Color::Green, &prompt);
        assert_eq!(lines.len(), 1);
        let spans = &lines[0].spans;
        assert_eq!(spans[1].content, "h");
        assert_eq!(spans[2].content, "é");
        assert_eq!(spans[3].content, "llo");
    }

    #[test]
    fn test_trailing_newline_gets_own_row() {
        let prompt = Span::raw(PROMPT);
        let lines = build_active_lines("foo\n", 4, Color::Green, &prompt);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].to_string(), "   ");
    }

    #[test]
    fn test_find_cursor_line() {
        assert_eq!(find_cursor_line("a\nb\nc", 0), 0);
        assert_eq!(find_cursor_line("a\nb\nc", 4), 2);
    }
}
