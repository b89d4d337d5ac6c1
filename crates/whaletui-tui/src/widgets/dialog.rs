//! Modal dialog builder
//!
//! Dialogs own their text, so callers can pass freshly formatted messages
//! without keeping them alive for the frame.

use crate::app::DialogFocus;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Horizontal room for borders and padding around the longest line
const PADDING: u16 = 4;

/// Builder for modal dialogs with consistent styling
pub struct DialogBuilder {
    title: String,
    lines: Vec<Line<'static>>,
    min_width: u16,
}

impl DialogBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            min_width: 40,
        }
    }

    /// Minimum width; the dialog grows to fit its longest line
    pub fn min_width(mut self, w: u16) -> Self {
        self.min_width = w;
        self
    }

    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.lines.push(Line::from(text.into()));
        self
    }

    pub fn empty_line(mut self) -> Self {
        self.lines.push(Line::from(""));
        self
    }

    /// Confirm/Cancel buttons, highlighting the focused one
    pub fn buttons(mut self, focus: DialogFocus) -> Self {
        let confirm_style = if focus == DialogFocus::Confirm {
            Style::default().bg(Color::Green).fg(Color::Black).bold()
        } else {
            Style::default().fg(Color::Green)
        };
        let cancel_style = if focus == DialogFocus::Cancel {
            Style::default().bg(Color::Red).fg(Color::White).bold()
        } else {
            Style::default().fg(Color::Red)
        };

        self.lines.push(Line::from(vec![
            Span::styled("  Confirm  ", confirm_style),
            Span::raw("    "),
            Span::styled("  Cancel  ", cancel_style),
        ]));
        self
    }

    /// Dimmed key hint at the bottom
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.lines.push(Line::from(Span::styled(
            text.into(),
            Style::default().fg(Color::DarkGray),
        )));
        self
    }

    fn width(&self) -> u16 {
        let longest = self.lines.iter().map(Line::width).max().unwrap_or(0) as u16;
        (longest + PADDING).max(self.min_width)
    }

    /// Render centered in `area`
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let height = self.lines.len() as u16 + 2;
        let dialog_area = centered_rect(self.width(), height, area);

        frame.render_widget(Clear, dialog_area);

        let dialog = Paragraph::new(self.lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

        frame.render_widget(dialog, dialog_area);
    }
}

/// Calculate a centered rectangle within an area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(40, 20, area);
        assert_eq!(centered, Rect::new(30, 15, 40, 20));
    }

    #[test]
    fn test_centered_rect_respects_offset() {
        let area = Rect::new(10, 5, 40, 20);
        let centered = centered_rect(20, 10, area);
        assert_eq!(centered, Rect::new(20, 10, 20, 10));
    }

    #[test]
    fn test_centered_rect_overflow() {
        let area = Rect::new(0, 0, 30, 20);
        let centered = centered_rect(50, 30, area);
        assert_eq!(centered.width, 30);
        assert_eq!(centered.height, 20);
    }

    #[test]
    fn test_width_grows_with_message() {
        let short = DialogBuilder::new("Confirm").message("Stop?");
        assert_eq!(short.width(), 40);

        let message = format!("Stop container '{}'?", "x".repeat(60));
        let long = DialogBuilder::new("Confirm").message(message.clone());
        assert_eq!(long.width(), message.len() as u16 + PADDING);
    }
}
