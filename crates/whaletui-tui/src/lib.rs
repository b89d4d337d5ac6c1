//! TUI application for whaletui
//!
//! A container dashboard built with Ratatui, plus the embedded shell that
//! runs commands in a container through the provider's exec API.

pub mod app;
mod event;
pub mod shell_state;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppError, AppResult, ConfirmAction, DialogFocus, View};
pub use event::{Event, EventHandler};
pub use shell_state::ShellView;
pub use theme::ShellColors;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use whaletui_config::GlobalConfig;
use whaletui_provider::{ContainerInfo, ContainerProvider};

type CrosstermTerminal = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> AppResult<CrosstermTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut CrosstermTerminal) -> AppResult<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the dashboard
pub async fn run(provider: Arc<dyn ContainerProvider>, config: GlobalConfig) -> AppResult<()> {
    // Load before touching the terminal so connection errors print normally
    let mut app = App::new(provider, config).await?;

    let mut terminal = setup_terminal()?;
    let res = app.run(&mut terminal).await;
    restore_terminal(&mut terminal)?;

    res
}

/// Run only the embedded shell for `container`, quitting when it exits
pub async fn run_shell(
    provider: Arc<dyn ContainerProvider>,
    config: GlobalConfig,
    container: ContainerInfo,
) -> AppResult<()> {
    let mut app = App::with_provider(provider, config);
    app.quit_on_shell_exit = true;
    app.open_shell(&container);
    if app.shell.is_none() {
        let reason = app
            .status_message
            .take()
            .unwrap_or_else(|| "shell could not be opened".to_string());
        return Err(AppError::Io(io::Error::new(io::ErrorKind::Other, reason)));
    }

    let mut terminal = setup_terminal()?;
    let res = app.run(&mut terminal).await;
    restore_terminal(&mut terminal)?;

    res
}
