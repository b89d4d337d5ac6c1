use super::*;
use ansi_to_tui::IntoText;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

pub(super) fn draw_logs(frame: &mut Frame, app: &App, area: Rect) {
    let name = app
        .selected_container()
        .map_or("Unknown", |c| c.name.as_str());

    let inner_height = area.height.saturating_sub(2) as usize;
    let total = app.logs.len();
    // Keep the pane full when scrolled near the end
    let top = app.logs_scroll.min(total.saturating_sub(inner_height));

    let text: Vec<Line> = app
        .logs
        .iter()
        .enumerate()
        .skip(top)
        .take(inner_height)
        .map(|(i, line)| {
            let mut spans = vec![Span::styled(
                format!("{:>5} ", i + 1),
                Style::default().fg(Color::DarkGray),
            )];
            spans.extend(log_spans(line));
            Line::from(spans)
        })
        .collect();

    let title = if total == 0 {
        format!(" Logs: {} (empty) ", name)
    } else {
        let percent = if total <= inner_height {
            100
        } else {
            ((top + inner_height).min(total) * 100) / total
        };
        format!(" Logs: {} [{}/{}] {}% ", name, top + 1, total, percent)
    };

    let logs = Paragraph::new(text).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(logs, area);

    if total > inner_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"));
        let mut state =
            ScrollbarState::new(total.saturating_sub(inner_height)).position(top);
        let track = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(scrollbar, track, &mut state);
    }
}

/// Spans of one log line with its color escapes applied
fn log_spans(line: &str) -> Vec<Span<'static>> {
    match line.into_text() {
        Ok(text) => text
            .lines
            .into_iter()
            .flat_map(|l| l.spans)
            .collect(),
        Err(_) => vec![Span::raw(line.to_string())],
    }
}
