//! TUI widgets: ratatui components for the main layout
//!
//! Layout:
//! ┌── Header (3) ────────────────────────────────────┐
//! ├── Conversation (flex) ───────────────────────────┤
//! ├── Input (3..max+2) ──────────────────────────────┤
//! └── StatusBar (1) ─────────────────────────────────┘

pub mod header;
pub mod help;
pub mod input;
pub mod message_list;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Compute the main layout regions from a terminal area
pub struct MainLayout {
    pub header: Rect,
    pub conversation: Rect,
    pub input: Rect,
    pub status_bar: Rect,
}

impl MainLayout {
    /// Compute layout with dynamic input height.
    ///
    /// The input area grows from 3 (1 line + borders) up to
    /// `max_input_height + 2`, capped so the other regions stay on screen.
    pub fn compute(area: Rect, input_lines: u16, max_input_height: u16) -> Self {
        let header_h: u16 = 3;
        let status_h: u16 = 1;

        let max_for_input = area.height.saturating_sub(header_h + status_h);
        let desired_h = (input_lines + 2).clamp(3, max_input_height.max(1) + 2);
        let input_h = desired_h.min(max_for_input).max(1);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_h),
                Constraint::Fill(1),
                Constraint::Length(input_h),
                Constraint::Length(status_h),
            ])
            .split(area);

        Self {
            header: vertical[0],
            conversation: vertical[1],
            input: vertical[2],
            status_bar: vertical[3],
        }
    }

    /// Centered overlay rectangle for help dialog
    pub fn centered_overlay(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vert[1])[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_input_uses_three_rows() {
        let layout = MainLayout::compute(Rect::new(0, 0, 80, 24), 1, 8);
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.input.height, 3);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.conversation.height, 24 - 3 - 3 - 1);
    }

    #[test]
    fn test_input_growth_is_capped() {
        let layout = MainLayout::compute(Rect::new(0, 0, 80, 24), 20, 8);
        assert_eq!(layout.input.height, 10);

        let tiny = MainLayout::compute(Rect::new(0, 0, 80, 8), 20, 8);
        assert!(tiny.input.height <= 4);
    }

    #[test]
    fn test_centered_overlay_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let overlay = MainLayout::centered_overlay(60, 70, area);
        assert_eq!(overlay.width, 60);
        assert!(overlay.x > 0 && overlay.right() < area.right());
    }
}
