//! Main TUI application state and logic

use crate::event::{Event, EventHandler};
use crate::shell_state::ShellView;
use crate::theme::ShellColors;
use crate::ui;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::TableState;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use whaletui_config::GlobalConfig;
use whaletui_core::{provider_exec, ExitCallback, InteractiveGuard, Session};
use whaletui_provider::{ContainerDetails, ContainerId, ContainerInfo, ContainerProvider};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Provider error: {0}")]
    Provider(#[from] whaletui_provider::ProviderError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Seconds to wait for a container to stop before it is killed
const STOP_TIMEOUT: u32 = 10;

/// Log lines fetched per request
const LOG_TAIL: usize = 1000;

/// Lines moved by PageUp/PageDown in the logs and details views
const PAGE_SIZE: usize = 20;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Container table
    Containers,
    /// Embedded shell for one container
    Shell,
    /// Recent logs of the selected container
    Logs,
    /// Inspect result for the selected container
    Details,
    /// Confirmation dialog over the container table
    Confirm,
    /// Key reference
    Help,
}

/// Action waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Stop { id: ContainerId, name: String },
}

/// Which dialog button has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogFocus {
    #[default]
    Confirm,
    Cancel,
}

/// Application state
pub struct App {
    pub provider: Arc<dyn ContainerProvider>,
    pub config: GlobalConfig,
    pub view: View,
    pub containers: Vec<ContainerInfo>,
    pub selected: usize,
    pub containers_table_state: TableState,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub confirm_action: Option<ConfirmAction>,
    pub dialog_focus: DialogFocus,
    pub logs: Vec<String>,
    /// First visible log line
    pub logs_scroll: usize,
    pub details: Option<ContainerDetails>,
    pub details_scroll: usize,
    /// Active shell, present while `view == View::Shell`
    pub shell: Option<ShellView>,
    pub shell_colors: ShellColors,
    /// Quit when the shell exits instead of returning to the table
    pub quit_on_shell_exit: bool,
    shell_exit_tx: mpsc::UnboundedSender<String>,
    shell_exit_rx: mpsc::UnboundedReceiver<String>,
    refresh_interval: Duration,
    last_refresh: Instant,
}

impl App {
    /// Create the application without touching the provider
    pub fn with_provider(provider: Arc<dyn ContainerProvider>, config: GlobalConfig) -> Self {
        let (shell_exit_tx, shell_exit_rx) = mpsc::unbounded_channel();
        let shell_colors = ShellColors::from_config(&config.theme);
        let refresh_interval = Duration::from_secs(config.defaults.refresh_interval.max(1));

        Self {
            provider,
            config,
            view: View::Containers,
            containers: Vec::new(),
            selected: 0,
            containers_table_state: TableState::default(),
            status_message: None,
            should_quit: false,
            confirm_action: None,
            dialog_focus: DialogFocus::default(),
            logs: Vec::new(),
            logs_scroll: 0,
            details: None,
            details_scroll: 0,
            shell: None,
            shell_colors,
            quit_on_shell_exit: false,
            shell_exit_tx,
            shell_exit_rx,
            refresh_interval,
            last_refresh: Instant::now(),
        }
    }

    /// Create the application and load the container list
    pub async fn new(provider: Arc<dyn ContainerProvider>, config: GlobalConfig) -> AppResult<Self> {
        let mut app = Self::with_provider(provider, config);
        app.containers = app.provider.list(true).await?;
        app.sync_selection();
        Ok(app)
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> AppResult<()> {
        let mut events = EventHandler::new(Duration::from_millis(250));

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            match events.next().await {
                Some(event) => self.handle_event(event).await?,
                None => break,
            }
        }

        Ok(())
    }

    async fn handle_event(&mut self, event: Event) -> AppResult<()> {
        match event {
            Event::Key(key) => self.send_key(key.code, key.modifiers).await?,
            Event::Tick => {
                if self.view == View::Containers && self.last_refresh.elapsed() >= self.refresh_interval
                {
                    self.refresh_containers().await;
                }
            }
            Event::Resize(_, _) => {
                // Terminal will redraw automatically
            }
        }
        Ok(())
    }

    /// Handle a key press as if it came from the terminal
    pub async fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> AppResult<()> {
        match self.view {
            View::Shell => self.handle_shell_key(code, modifiers).await,
            View::Logs => self.handle_logs_key(code, modifiers).await,
            View::Details => self.handle_details_key(code, modifiers).await,
            View::Confirm => self.handle_confirm_key(code).await?,
            View::Help => {
                // Any key returns to the table
                self.view = View::Containers;
            }
            View::Containers => self.handle_containers_key(code).await?,
        }
        Ok(())
    }

    async fn handle_containers_key(&mut self, code: KeyCode) -> AppResult<()> {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') | KeyCode::F(1) => self.view = View::Help,
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.containers.is_empty() {
                    self.selected = (self.selected + 1) % self.containers.len();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if !self.containers.is_empty() {
                    self.selected = self
                        .selected
                        .checked_sub(1)
                        .unwrap_or(self.containers.len() - 1);
                }
            }
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.containers.len().saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('e') => self.open_shell_for_selected(),
            KeyCode::Char('l') => self.fetch_logs().await,
            KeyCode::Char('i') => self.fetch_details().await,
            KeyCode::Char('s') => self.toggle_selected().await,
            KeyCode::Char('r') | KeyCode::F(5) => {
                self.refresh_containers().await;
                self.status_message = Some("Refreshed".to_string());
            }
            _ => {}
        }
        self.sync_selection();
        Ok(())
    }

    async fn handle_logs_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let last = self.logs.len().saturating_sub(1);
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.view = View::Containers,
            KeyCode::Char('j') | KeyCode::Down => {
                self.logs_scroll = (self.logs_scroll + 1).min(last);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.logs_scroll = self.logs_scroll.saturating_sub(1);
            }
            KeyCode::Char('g') | KeyCode::Home => self.logs_scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.logs_scroll = last,
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.logs_scroll = (self.logs_scroll + PAGE_SIZE / 2).min(last);
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.logs_scroll = self.logs_scroll.saturating_sub(PAGE_SIZE / 2);
            }
            KeyCode::PageDown => self.logs_scroll = (self.logs_scroll + PAGE_SIZE).min(last),
            KeyCode::PageUp => self.logs_scroll = self.logs_scroll.saturating_sub(PAGE_SIZE),
            KeyCode::Char('r') | KeyCode::F(5) => self.fetch_logs().await,
            KeyCode::Char('i') => self.fetch_details().await,
            _ => {}
        }
    }

    async fn handle_details_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let last = self
            .details
            .as_ref()
            .map_or(0, |d| ui::detail_lines(d).len().saturating_sub(1));
        match code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.details = None;
                self.view = View::Containers;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.details_scroll = (self.details_scroll + 1).min(last);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.details_scroll = self.details_scroll.saturating_sub(1);
            }
            KeyCode::Char('g') | KeyCode::Home => self.details_scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.details_scroll = last,
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.details_scroll = (self.details_scroll + PAGE_SIZE / 2).min(last);
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.details_scroll = self.details_scroll.saturating_sub(PAGE_SIZE / 2);
            }
            KeyCode::Char('r') | KeyCode::F(5) => self.fetch_details().await,
            KeyCode::Char('l') => self.fetch_logs().await,
            _ => {}
        }
    }

    /// Load the selected container's recent logs and show them, scrolled to the end
    pub async fn fetch_logs(&mut self) {
        let Some(container) = self.selected_container().cloned() else {
            return;
        };

        match self.provider.logs(&container.id, Some(LOG_TAIL)).await {
            Ok(output) => {
                self.logs = output.lines().map(str::to_string).collect();
                self.logs_scroll = self.logs.len().saturating_sub(1);
                self.view = View::Logs;
                self.status_message = Some(format!("{} log lines", self.logs.len()));
            }
            Err(e) => {
                tracing::warn!("failed to fetch logs for {}: {}", container.name, e);
                self.status_message = Some(format!("Failed to fetch logs: {}", e));
            }
        }
    }

    /// Inspect the selected container and show the result
    pub async fn fetch_details(&mut self) {
        let Some(container) = self.selected_container().cloned() else {
            return;
        };

        match self.provider.inspect(&container.id).await {
            Ok(details) => {
                self.details = Some(details);
                self.details_scroll = 0;
                self.view = View::Details;
                self.status_message = None;
            }
            Err(e) => {
                tracing::warn!("failed to inspect {}: {}", container.name, e);
                self.status_message = Some(format!("Failed to inspect {}: {}", container.name, e));
            }
        }
    }

    async fn handle_confirm_key(&mut self, code: KeyCode) -> AppResult<()> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm().await,
            KeyCode::Enter => {
                if self.dialog_focus == DialogFocus::Confirm {
                    self.confirm().await;
                } else {
                    self.cancel_confirm();
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.cancel_confirm(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.dialog_focus = match self.dialog_focus {
                    DialogFocus::Confirm => DialogFocus::Cancel,
                    DialogFocus::Cancel => DialogFocus::Confirm,
                };
            }
            _ => {}
        }
        Ok(())
    }

    async fn confirm(&mut self) {
        if let Some(action) = self.confirm_action.take() {
            self.execute_confirm_action(action).await;
        }
        self.view = View::Containers;
    }

    fn cancel_confirm(&mut self) {
        self.confirm_action = None;
        self.view = View::Containers;
    }

    async fn execute_confirm_action(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::Stop { id, name } => {
                self.status_message = Some(match self.provider.stop(&id, Some(STOP_TIMEOUT)).await {
                    Ok(()) => format!("Stopped {}", name),
                    Err(e) => {
                        tracing::warn!("failed to stop {}: {}", name, e);
                        format!("Failed to stop {}: {}", name, e)
                    }
                });
                self.refresh_containers().await;
            }
        }
    }

    /// Start the selected container, or ask before stopping it
    async fn toggle_selected(&mut self) {
        let Some(container) = self.selected_container().cloned() else {
            return;
        };

        if container.status.is_running() {
            self.confirm_action = Some(ConfirmAction::Stop {
                id: container.id,
                name: container.name,
            });
            self.dialog_focus = DialogFocus::Confirm;
            self.view = View::Confirm;
            return;
        }

        self.status_message = Some(match self.provider.start(&container.id).await {
            Ok(()) => format!("Started {}", container.name),
            Err(e) => {
                tracing::warn!("failed to start {}: {}", container.name, e);
                format!("Failed to start {}: {}", container.name, e)
            }
        });
        self.refresh_containers().await;
    }

    /// Reload the container list, keeping the selection in range
    pub async fn refresh_containers(&mut self) {
        match self.provider.list(true).await {
            Ok(containers) => self.containers = containers,
            Err(e) => {
                tracing::warn!("container refresh failed: {}", e);
                self.status_message = Some(format!("Refresh failed: {}", e));
            }
        }
        self.last_refresh = Instant::now();
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        if self.containers.is_empty() {
            self.selected = 0;
            self.containers_table_state.select(None);
        } else {
            self.selected = self.selected.min(self.containers.len() - 1);
            self.containers_table_state.select(Some(self.selected));
        }
    }

    pub fn selected_container(&self) -> Option<&ContainerInfo> {
        self.containers.get(self.selected)
    }

    fn open_shell_for_selected(&mut self) {
        let Some(container) = self.selected_container().cloned() else {
            return;
        };

        if !container.status.is_running() {
            self.status_message = Some(format!("Container {} is not running", container.name));
            return;
        }

        self.open_shell(&container);
    }

    /// Open the shell view for `container`
    pub fn open_shell(&mut self, container: &ContainerInfo) {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                self.status_message = Some(format!("Cannot open shell: {}", e));
                return;
            }
        };

        let tx = self.shell_exit_tx.clone();
        let exited_id = container.id.0.clone();
        let on_exit: ExitCallback = Box::new(move || {
            // The receiver lives as long as the app
            let _ = tx.send(exited_id.clone());
        });

        let session = Session::new(
            container.id.0.clone(),
            container.name.clone(),
            Some(on_exit),
            Some(provider_exec(self.provider.clone(), handle)),
        )
        .with_guard(InteractiveGuard::new(
            &self.config.shell.extra_interactive_commands,
        ));

        tracing::info!("opened shell for {} ({})", container.name, container.id.short());
        self.shell = Some(ShellView::new(session));
        self.status_message = None;
        self.view = View::Shell;
    }

    async fn handle_shell_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if let Some(shell) = self.shell.as_mut() {
            shell.handle_key(code, modifiers);
        }

        let mut exited = false;
        while let Ok(id) = self.shell_exit_rx.try_recv() {
            tracing::debug!("shell for {} exited", id);
            exited = true;
        }

        if exited {
            self.close_shell().await;
        }
    }

    async fn close_shell(&mut self) {
        self.shell = None;
        if self.quit_on_shell_exit {
            self.should_quit = true;
            return;
        }
        self.view = View::Containers;
        self.refresh_containers().await;
    }
}
