//! Activity timeline: expand/collapse state and line building
//!
//! The timeline of one AI turn is collapsed to a single summary line by
//! default. Expanding it lists every step; each step with displayable
//! detail can be expanded on its own.
//!
//! Rendering is a pure function of the events, the live flag and the
//! [`TimelineUiState`] kept for that timeline's [`TimelineKey`].

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use scout_domain::{ActivityEvent, DetailLine, MessageId, select_icon};

pub const HEADER_TITLE: &str = "Research";
pub const PLACEHOLDER: &str = "Searching...";
pub const COMPLETED_LABEL: &str = "Research complete";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

/// Which event sequence a UI state belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimelineKey {
    /// The turn currently streaming
    Live,
    /// Archived events of a finished AI turn
    Message(MessageId),
}

/// Local expand/collapse state of one timeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineUiState {
    expanded: bool,
    rows: Vec<bool>,
    selected_row: usize,
}

impl TimelineUiState {
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn is_row_expanded(&self, index: usize) -> bool {
        self.rows.get(index).copied().unwrap_or(false)
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    /// Toggle one row. Rows without displayable detail stay collapsed.
    ///
    /// Returns whether the row changed.
    pub fn toggle_row(&mut self, index: usize, events: &[ActivityEvent]) -> bool {
        let Some(event) = events.get(index) else {
            return false;
        };
        if !event.has_detail() {
            return false;
        }
        if self.rows.len() <= index {
            self.rows.resize(index + 1, false);
        }
        self.rows[index] = !self.rows[index];
        true
    }

    pub fn select_row(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected_row = 0;
            return;
        }
        let current = self.selected_row.min(len - 1) as isize;
        self.selected_row = (current + delta).clamp(0, len as isize - 1) as usize;
    }
}

/// Inputs for building the lines of one timeline
pub struct TimelineView<'a> {
    pub events: &'a [ActivityEvent],
    pub is_live: bool,
    pub ui: &'a TimelineUiState,
    /// Highlight the selected row (the owning turn is selected)
    pub focused: bool,
    pub spinner_frame: usize,
}

impl<'a> TimelineView<'a> {
    /// Collapsed summary text
    pub fn summary(&self) -> &'a str {
        match self.events.last() {
            _ if !self.is_live => COMPLETED_LABEL,
            Some(last) => &last.title,
            None => PLACEHOLDER,
        }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let accent = Style::default().fg(Color::Magenta);
        let dim = Style::default().fg(Color::DarkGray);

        if !self.ui.is_expanded() {
            let glyph = match self.events.last() {
                Some(last) => select_icon(&last.title, self.is_live).glyph(),
                None if self.is_live => spinner_glyph(self.spinner_frame),
                None => "•",
            };
            return vec![Line::from(vec![
                Span::styled("▸ ", accent),
                Span::styled(format!("{} ", glyph), accent),
                Span::styled(HEADER_TITLE, accent.add_modifier(Modifier::BOLD)),
                Span::styled(" · ", dim),
                Span::styled(self.summary().to_string(), dim),
            ])];
        }

        let mut lines = vec![Line::from(vec![
            Span::styled("▾ ", accent),
            Span::styled(HEADER_TITLE, accent.add_modifier(Modifier::BOLD)),
        ])];

        let last = self.events.len().saturating_sub(1);
        for (index, event) in self.events.iter().enumerate() {
            let icon = select_icon(&event.title, self.is_live && index == last);
            let marker = match (event.has_detail(), self.ui.is_row_expanded(index)) {
                (false, _) => "  ",
                (true, false) => "▸ ",
                (true, true) => "▾ ",
            };
            let mut title_style = Style::default().fg(Color::White);
            if self.focused && index == self.ui.selected_row() {
                title_style = title_style.add_modifier(Modifier::REVERSED);
            }
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(marker, dim),
                Span::raw(format!("{} ", icon.glyph())),
                Span::styled(event.title.clone(), title_style),
            ]));

            if self.ui.is_row_expanded(index) {
                lines.extend(event.data.detail_lines().into_iter().map(detail_line));
            }
        }

        if self.is_live {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(
                    format!("{} {}", spinner_glyph(self.spinner_frame), PLACEHOLDER),
                    dim,
                ),
            ]));
        }

        lines
    }
}

fn detail_line(line: DetailLine) -> Line<'static> {
    match line {
        DetailLine::Text(text) => Line::from(vec![
            Span::raw("      "),
            Span::styled(text, Style::default().fg(Color::Gray)),
        ]),
        DetailLine::Link { label, url } => Line::from(vec![
            Span::raw("      "),
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled(format!(" <{}>", url), Style::default().fg(Color::DarkGray)),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_domain::{EventData, EventDetail};

    fn plain(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn events() -> Vec<ActivityEvent> {
        vec![
            ActivityEvent::new(
                "Generating Search Queries",
                EventData::Details(vec![EventDetail::plain("rust tui")]),
            ),
            ActivityEvent::new(
                "Web Research",
                EventData::Details(vec![EventDetail::link("Docs", "https://docs.rs")]),
            ),
            ActivityEvent::new("Reflection", EventData::Structured(serde_json::json!({}))),
        ]
    }

    fn view<'a>(
        events: &'a [ActivityEvent],
        is_live: bool,
        ui: &'a TimelineUiState,
    ) -> TimelineView<'a> {
        TimelineView {
            events,
            is_live,
            ui,
            focused: false,
            spinner_frame: 0,
        }
    }

    #[test]
    fn test_collapsed_summary_variants() {
        let ui = TimelineUiState::default();
        let events = events();
        assert_eq!(view(&[], true, &ui).summary(), PLACEHOLDER);
        assert_eq!(view(&events, true, &ui).summary(), "Reflection");
        assert_eq!(view(&events, false, &ui).summary(), COMPLETED_LABEL);
        assert_eq!(view(&events, false, &ui).lines().len(), 1);
    }

    #[test]
    fn test_collapsed_live_summary_shows_in_progress_icon() {
        let ui = TimelineUiState::default();
        let events = events();
        let line = view(&events, true, &ui).lines()[0].to_string();
        assert!(line.contains("⟳"));
        assert!(line.contains("Reflection"));
    }

    #[test]
    fn test_expanded_lists_every_event() {
        let mut ui = TimelineUiState::default();
        ui.toggle();
        let events = events();
        let text = plain(&view(&events, false, &ui).lines());
        assert_eq!(text.len(), 4);
        assert!(text[1].contains("Generating Search Queries"));
        assert!(text[3].contains("Reflection"));
    }

    #[test]
    fn test_collapse_then_expand_yields_same_events() {
        let mut ui = TimelineUiState::default();
        ui.toggle();
        let events = events();
        let before = plain(&view(&events, false, &ui).lines());
        ui.toggle();
        ui.toggle();
        let after = plain(&view(&events, false, &ui).lines());
        assert_eq!(before, after);
    }

    #[test]
    fn test_row_without_detail_cannot_expand() {
        let mut ui = TimelineUiState::default();
        let events = events();
        assert!(!ui.toggle_row(2, &events));
        assert!(!ui.is_row_expanded(2));
        assert!(!ui.toggle_row(9, &events));
    }

    #[test]
    fn test_expanded_row_renders_detail_lines() {
        let mut ui = TimelineUiState::default();
        ui.toggle();
        let events = events();
        assert!(ui.toggle_row(1, &events));
        let text = plain(&view(&events, false, &ui).lines());
        assert!(text.iter().any(|l| l.contains("Docs") && l.contains("<https://docs.rs>")));

        assert!(ui.toggle_row(1, &events));
        assert!(!ui.is_row_expanded(1));
    }

    #[test]
    fn test_live_expanded_timeline_has_spinner_row() {
        let mut ui = TimelineUiState::default();
        ui.toggle();
        let events = events();
        let text = plain(&view(&events, true, &ui).lines());
        assert_eq!(text.len(), 5);
        assert!(text[4].contains(PLACEHOLDER));
        // Latest event of a live turn uses the in-progress icon
        assert!(text[3].contains("⟳"));
    }

    #[test]
    fn test_select_row_clamps() {
        let mut ui = TimelineUiState::default();
        ui.select_row(5, 3);
        assert_eq!(ui.selected_row(), 2);
        ui.select_row(-10, 3);
        assert_eq!(ui.selected_row(), 0);
        ui.select_row(1, 0);
        assert_eq!(ui.selected_row(), 0);
    }
}
