use super::*;

pub(super) fn draw_containers(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.containers.is_empty() {
        let empty = Paragraph::new(
            "No containers found.\n\n\
             Start a container with your runtime, then press 'r' to refresh.",
        )
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().title(" Containers ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(" "),
        Cell::from("Name"),
        Cell::from("ID"),
        Cell::from("Image"),
        Cell::from("State"),
        Cell::from("Created"),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let now = chrono::Utc::now().timestamp();
    let rows: Vec<Row> = app
        .containers
        .iter()
        .map(|container| {
            let (symbol, color) = status_symbol(container.status);

            let state = container.state_label();

            Row::new(vec![
                Cell::from(symbol).style(Style::default().fg(color)),
                Cell::from(container.name.clone()).style(Style::default().bold()),
                Cell::from(container.id.short().to_string())
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(container.image.clone()),
                Cell::from(state).style(Style::default().fg(color)),
                Cell::from(format_time_ago(container.created, now))
                    .style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),  // Status icon
        Constraint::Length(24), // Name
        Constraint::Length(14), // ID
        Constraint::Min(16),    // Image
        Constraint::Length(22), // State
        Constraint::Length(10), // Created
    ];

    let running = app
        .containers
        .iter()
        .filter(|c| c.status.is_running())
        .count();
    let title = format!(" Containers ({}/{} running) ", running, app.containers.len());

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, &mut app.containers_table_state);
}

fn status_symbol(status: ContainerStatus) -> (&'static str, Color) {
    match status {
        ContainerStatus::Running => ("●", Color::Green),
        ContainerStatus::Exited | ContainerStatus::Dead => ("○", Color::DarkGray),
        ContainerStatus::Created => ("◔", Color::Cyan),
        ContainerStatus::Paused => ("◑", Color::Blue),
        ContainerStatus::Restarting | ContainerStatus::Removing => ("◐", Color::Yellow),
        ContainerStatus::Unknown => ("?", Color::Yellow),
    }
}

/// Compact age of a unix `timestamp` relative to `now`
pub fn format_time_ago(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86400 {
        format!("{}h ago", diff / 3600)
    } else if diff < 604800 {
        format!("{}d ago", diff / 86400)
    } else {
        format!("{}w ago", diff / 604800)
    }
}
