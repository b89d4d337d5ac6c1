use super::*;
use ansi_to_tui::IntoText;
use whaletui_core::SessionState;
use whaletui_provider::short_id;

const PLACEHOLDER: &str = "Type command and press Enter (ESC to exit shell mode)";

pub(super) fn draw_shell(frame: &mut Frame, app: &App, area: Rect) {
    let Some(shell) = app.shell.as_ref() else {
        return;
    };
    let colors = app.shell_colors;
    let session = &shell.session;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    // Output pane
    let title = format!(
        " Shell - {} ({}) ",
        session.container_name(),
        short_id(session.container_id())
    );
    let output_block = Block::default()
        .title(title)
        .title_style(Style::default().fg(colors.title).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let output = session.output();
    let height = output_block.inner(chunks[0]).height as usize;
    let top = u16::try_from(output.top_line(height)).unwrap_or(u16::MAX);

    // Command output may carry color escapes
    let text = output
        .text()
        .into_text()
        .unwrap_or_else(|_| Text::raw(output.text().to_string()));

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(colors.text).bg(colors.background))
        .block(output_block)
        .scroll((top, 0));
    frame.render_widget(paragraph, chunks[0]);

    // Command line
    let label = match session.state(shell.input.value()) {
        SessionState::MultiLine => "> ",
        _ => "$ ",
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.cmd_border))
        .style(Style::default().bg(colors.cmd_background));
    let inner = input_block.inner(chunks[1]);

    let label_width = label.len() as u16;
    let available = inner.width.saturating_sub(label_width).max(1) as usize;
    let column = shell.input.cursor_column();
    let offset = column.saturating_sub(available - 1);

    let body = if shell.input.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(colors.cmd_placeholder))
    } else {
        let visible: String = shell.input.value().chars().skip(offset).collect();
        Span::styled(visible, Style::default().fg(colors.cmd_text))
    };

    let line = Line::from(vec![
        Span::styled(label, Style::default().fg(colors.cmd_label).bold()),
        body,
    ]);
    frame.render_widget(Paragraph::new(line).block(input_block), chunks[1]);

    let cursor_x = inner.x + label_width + (column - offset) as u16;
    frame.set_cursor(cursor_x.min(inner.right().saturating_sub(1)), inner.y);
}
