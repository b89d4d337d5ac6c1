use super::*;

pub(super) fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let info = app.provider.info();
    let running = app
        .containers
        .iter()
        .filter(|c| c.status.is_running())
        .count();

    let line = Line::from(vec![
        Span::styled("Provider: ", Style::default().fg(Color::DarkGray)),
        Span::styled(info.provider_type.to_string(), Style::default().fg(Color::White).bold()),
        Span::styled(format!(" {}", info.version), Style::default().fg(Color::DarkGray)),
        Span::raw("  │  "),
        Span::styled("Running: ", Style::default().fg(Color::DarkGray)),
        Span::styled(running.to_string(), Style::default().fg(Color::Green)),
        Span::styled(format!("/{}", app.containers.len()), Style::default().fg(Color::Gray)),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .title(" whaletui - Container Dashboard ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

/// Context-sensitive help for the container table
pub(super) fn container_list_footer(app: &App) -> String {
    let Some(container) = app.selected_container() else {
        return "r: Refresh  ?: Help  q: Quit".to_string();
    };

    if container.status.is_running() {
        "j/k: Navigate  Enter/e: Shell  l: Logs  i: Inspect  s: Stop  r: Refresh  ?: Help  q: Quit"
            .to_string()
    } else {
        "j/k: Navigate  l: Logs  i: Inspect  s: Start  r: Refresh  ?: Help  q: Quit".to_string()
    }
}

/// Draw the footer with context-sensitive help
pub(super) fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.view {
        View::Containers => container_list_footer(app),
        View::Confirm => "y/Enter: Yes  n/Esc: No".to_string(),
        View::Help => "Press any key to close".to_string(),
        View::Logs => "j/k: Scroll  g/G: Top/End  r: Reload  i: Inspect  q/Esc: Back".to_string(),
        View::Details => "j/k: Scroll  r: Reload  l: Logs  q/Esc: Back".to_string(),
        View::Shell => {
            "Enter: Run  Tab: Complete  Up/Down: History  PgUp/PgDn: Scroll  Esc: Exit shell"
                .to_string()
        }
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let footer_text = if status.is_empty() {
        help_text
    } else {
        format!("{} │ {}", status, help_text)
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

pub(super) fn draw_help(frame: &mut Frame, area: Rect) {
    let bold = Style::default().bold().underlined();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Containers", bold)),
        Line::from(""),
        Line::from("  j/Down      Move selection down"),
        Line::from("  k/Up        Move selection up"),
        Line::from("  g/Home      Go to first container"),
        Line::from("  G/End       Go to last container"),
        Line::from("  Enter/e     Open a shell in the selected container"),
        Line::from("  l           Show container logs"),
        Line::from("  i           Inspect container details"),
        Line::from("  s           Start or Stop container"),
        Line::from("  r/F5        Refresh list"),
        Line::from("  ?/F1        Show this help"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(Span::styled("Logs / Details", bold)),
        Line::from(""),
        Line::from("  j/k         Scroll one line"),
        Line::from("  g/G         Jump to top / bottom"),
        Line::from("  Ctrl+D/U    Half page down / up"),
        Line::from("  r/F5        Reload"),
        Line::from("  q/Esc       Back to containers"),
        Line::from(""),
        Line::from(Span::styled("Shell", bold)),
        Line::from(""),
        Line::from("  Enter       Run the command (end a line with \\ to continue it)"),
        Line::from("  Tab         Complete commands and paths"),
        Line::from("  Up/Down     Browse command history"),
        Line::from("  PgUp/PgDn   Scroll output"),
        Line::from("  Ctrl+C      Discard the current line"),
        Line::from("  Ctrl+W/U    Delete word / delete to start"),
        Line::from("  Esc         Leave the shell (or type 'exit')"),
    ];

    let help = Paragraph::new(text)
        .block(Block::default().title(" Help ").borders(Borders::ALL))
        .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
}
