//! UI rendering for the TUI application

mod containers;
mod details;
mod dialogs;
mod header_footer;
mod logs;
mod shell;

use crate::app::{App, ConfirmAction, View};
use crate::widgets::DialogBuilder;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use whaletui_provider::ContainerStatus;

use containers::*;
use details::*;
use dialogs::*;
use header_footer::*;
use logs::*;
use shell::*;

pub use containers::format_time_ago;
pub use details::detail_lines;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    match app.view {
        View::Containers => draw_containers(frame, app, chunks[1]),
        View::Confirm => {
            draw_containers(frame, app, chunks[1]);
            draw_confirm_dialog(frame, app, area);
        }
        View::Help => draw_help(frame, chunks[1]),
        View::Shell => draw_shell(frame, app, chunks[1]),
        View::Logs => draw_logs(frame, app, chunks[1]),
        View::Details => draw_details(frame, app, chunks[1]),
    }

    draw_footer(frame, app, chunks[2]);
}
