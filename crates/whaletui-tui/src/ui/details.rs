use super::*;
use whaletui_provider::ContainerDetails;

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("─── {} ───", title),
        Style::default().fg(Color::DarkGray),
    ))
}

fn field(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{:<13}", format!("{}:", label))),
        Span::raw(value.into()),
    ])
}

fn status_color(status: ContainerStatus) -> Color {
    match status {
        ContainerStatus::Running => Color::Green,
        ContainerStatus::Exited | ContainerStatus::Dead => Color::Red,
        ContainerStatus::Paused => Color::Yellow,
        ContainerStatus::Created => Color::Cyan,
        _ => Color::DarkGray,
    }
}

/// Text of the details view, one entry per rendered line
pub fn detail_lines(details: &ContainerDetails) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Identity"),
        Line::from(vec![
            Span::raw(format!("{:<13}", "Name:")),
            Span::styled(details.name.clone(), Style::default().bold()),
        ]),
        field("ID", details.id.0.clone()),
        field("Image", details.image.clone()),
        Line::from(""),
        section("Status"),
        Line::from(vec![
            Span::raw(format!("{:<13}", "Status:")),
            Span::styled(
                details.status.to_string(),
                Style::default().fg(status_color(details.status)).bold(),
            ),
        ]),
        field("Created", details.created.as_deref().unwrap_or("N/A")),
        Line::from(""),
        section("Process"),
        field("Command", details.command.join(" ")),
        field("Working dir", details.working_dir.as_deref().unwrap_or("/")),
        field("User", details.user.as_deref().unwrap_or("root")),
    ];

    if !details.ports.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("Ports"));
        lines.extend(details.ports.iter().map(|p| Line::from(format!("  {}", p))));
    }

    if !details.env.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("Environment"));
        lines.extend(details.env.iter().map(|e| Line::from(format!("  {}", e))));
    }

    if !details.labels.is_empty() {
        let mut labels: Vec<_> = details.labels.iter().collect();
        labels.sort();
        lines.push(Line::from(""));
        lines.push(section("Labels"));
        lines.extend(
            labels
                .into_iter()
                .map(|(k, v)| Line::from(format!("  {}={}", k, v))),
        );
    }

    lines
}

pub(super) fn draw_details(frame: &mut Frame, app: &App, area: Rect) {
    let Some(details) = app.details.as_ref() else {
        return;
    };

    let scroll = u16::try_from(app.details_scroll).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(detail_lines(details))
        .block(
            Block::default()
                .title(format!(" Details: {} ", details.name))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use whaletui_provider::ContainerId;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| &*s.content).collect())
            .collect()
    }

    fn bare() -> ContainerDetails {
        ContainerDetails {
            id: ContainerId::new("abc"),
            name: "db".to_string(),
            image: "postgres:16".to_string(),
            status: ContainerStatus::Exited,
            created: None,
            working_dir: None,
            user: None,
            env: Vec::new(),
            command: Vec::new(),
            ports: Vec::new(),
            labels: HashMap::new(),
        }
    }

    #[test]
    fn test_empty_sections_are_left_out() {
        let text = plain(&detail_lines(&bare()));
        assert!(text.contains(&"Created:     N/A".to_string()));
        assert!(text.contains(&"User:        root".to_string()));
        assert!(!text.iter().any(|l| l.contains("Ports")));
        assert!(!text.iter().any(|l| l.contains("Environment")));
    }

    #[test]
    fn test_labels_are_sorted() {
        let mut details = bare();
        details.labels = HashMap::from([
            ("tier".to_string(), "db".to_string()),
            ("app".to_string(), "shop".to_string()),
        ]);

        let text = plain(&detail_lines(&details));
        let start = text.iter().position(|l| l.contains("Labels")).unwrap();
        assert_eq!(text[start + 1], "  app=shop");
        assert_eq!(text[start + 2], "  tier=db");
    }
}
