//! Message list widget: human/AI bubbles with activity timelines
//!
//! Human messages are right-aligned. AI messages carry their timeline
//! above the content; the most recent AI message shows the revealed
//! prefix instead of the full text. While a turn is waiting for its AI
//! message, a standalone live timeline (or an initializing line) closes
//! the list.

use crate::tui::state::TuiState;
use crate::tui::timeline::{TimelineKey, TimelineUiState, TimelineView, spinner_glyph};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use scout_domain::Message;
use std::time::Instant;

const INITIALIZING: &str = "Initializing...";

pub struct MessageListWidget<'a> {
    state: &'a TuiState,
    now: Instant,
}

impl<'a> MessageListWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self {
            state,
            now: Instant::now(),
        }
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        let state = self.state;
        let collapsed = TimelineUiState::default();
        let selected = state.selected_message_index();
        let mut lines = Vec::new();

        for (index, message) in state.conversation.messages().iter().enumerate() {
            if message.is_human() {
                human_bubble(message, &mut lines);
            } else {
                let is_selected = selected == Some(index);
                lines.push(self.ai_header(message, is_selected));

                if let Some((key, events)) = state.timeline_at(index) {
                    let view = TimelineView {
                        events,
                        is_live: key == TimelineKey::Live,
                        ui: state.timeline_ui(&key).unwrap_or(&collapsed),
                        focused: is_selected,
                        spinner_frame: state.spinner_frame,
                    };
                    lines.extend(view.lines());
                }

                let text = state.visible_text(index).unwrap_or_default();
                lines.extend(text.lines().map(|l| Line::from(format!("  {}", l))));
            }
            lines.push(Line::from(""));
        }

        if state.conversation.awaiting_ai_message() {
            let live = state.conversation.live_events();
            if live.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("{} {}", spinner_glyph(state.spinner_frame), INITIALIZING),
                    Style::default().fg(Color::DarkGray),
                )));
            } else {
                let view = TimelineView {
                    events: live,
                    is_live: true,
                    ui: state
                        .timeline_ui(&TimelineKey::Live)
                        .unwrap_or(&collapsed),
                    focused: true,
                    spinner_frame: state.spinner_frame,
                };
                lines.extend(view.lines());
            }
        }

        lines
    }

    fn ai_header(&self, message: &Message, is_selected: bool) -> Line<'static> {
        let mut spans = vec![Span::styled(
            "Agent",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )];
        if is_selected {
            spans.push(Span::styled(" ◆", Style::default().fg(Color::Yellow)));
        }
        if self
            .state
            .copy_feedback
            .is_copied(message.id(), self.now)
        {
            spans.push(Span::styled(
                " [Copied]",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    }
}

fn human_bubble(message: &Message, lines: &mut Vec<Line<'static>>) {
    lines.push(
        Line::from(Span::styled(
            "You",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ))
        .right_aligned(),
    );
    for content_line in message.content().lines() {
        lines.push(
            Line::from(Span::styled(
                content_line.to_string(),
                Style::default().fg(Color::White),
            ))
            .right_aligned(),
        );
    }
}

impl<'a> Widget for MessageListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from(self.build_lines());
        let visible_height = area.height.saturating_sub(2); // borders
        let content_width = area.width.saturating_sub(2); // borders

        // Built without block so line_count returns pure content lines.
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
        let total_lines = paragraph.line_count(content_width) as u16;

        // scroll_offset=0 means "show bottom"
        let scroll = if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            let offset = self.state.scroll_offset.min(max_scroll as usize) as u16;
            max_scroll - offset
        } else {
            0
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Conversation ")
            .style(Style::default().fg(Color::White));

        paragraph.block(block).scroll((scroll, 0)).render(area, buf);
    }
}
