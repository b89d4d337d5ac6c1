//! The shell session: one per attached container
//!
//! A [`Session`] turns key presses from the input widget into output text.
//! Enter runs the line through continuation handling, built-ins, the
//! interactive-command guard and finally the exec function. Every remote
//! call blocks the caller until it returns.

use crate::builtin::{welcome_banner, Builtin, EXIT_MESSAGE, HELP_TEXT};
use crate::classify::{is_continuation, strip_continuation, Command};
use crate::completion::{self, Completion};
use crate::guard::{InteractiveGuard, INTERACTIVE_WARNING};
use crate::history::{Direction, History};
use crate::output::OutputSink;
use crate::{CoreError, ExecFn};
use whaletui_provider::short_id;

/// Called once when the session exits
pub type ExitCallback = Box<dyn FnMut() + Send>;

/// Keys the session reacts to; everything else is editing and stays in the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKey {
    Enter,
    Escape,
    Up,
    Down,
    Tab,
    /// Ctrl+C
    Interrupt,
}

/// The text input the session reads from and writes to
pub trait InputField {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
}

impl InputField for String {
    fn text(&self) -> String {
        self.clone()
    }

    fn set_text(&mut self, text: &str) {
        *self = text.to_string();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing typed, no pending continuation lines
    Idle,
    /// Text in the input
    Composing,
    /// Continuation lines waiting for the final line
    MultiLine,
    /// Exited; keys are ignored
    Exited,
}

pub struct Session {
    container_id: String,
    container_name: String,
    output: OutputSink,
    multi_line: Vec<String>,
    history: History,
    guard: InteractiveGuard,
    exec: Option<ExecFn>,
    on_exit: Option<ExitCallback>,
    exited: bool,
}

impl Session {
    /// Start a session; the output begins with the welcome banner
    pub fn new(
        container_id: impl Into<String>,
        container_name: impl Into<String>,
        on_exit: Option<ExitCallback>,
        exec: Option<ExecFn>,
    ) -> Self {
        let mut session = Self {
            container_id: container_id.into(),
            container_name: container_name.into(),
            output: OutputSink::new(),
            multi_line: Vec::new(),
            history: History::new(),
            guard: InteractiveGuard::default(),
            exec,
            on_exit,
            exited: false,
        };
        session.write_banner();
        session
    }

    /// Replace the interactive-command guard
    pub fn with_guard(mut self, guard: InteractiveGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Handle one key. Returns false when the session has exited and
    /// ignored it.
    pub fn handle_key(&mut self, key: ShellKey, input: &mut dyn InputField) -> bool {
        if self.exited {
            return false;
        }

        match key {
            ShellKey::Enter => {
                let line = input.text();
                input.set_text("");
                self.submit(&line);
            }
            ShellKey::Escape => self.exit(),
            ShellKey::Up => self.navigate(Direction::Up, input),
            ShellKey::Down => self.navigate(Direction::Down, input),
            ShellKey::Tab => self.complete(input),
            ShellKey::Interrupt => self.interrupt(input),
        }
        true
    }

    /// Process a submitted line as if Enter was pressed on it
    pub fn submit(&mut self, line: &str) {
        if self.exited {
            return;
        }

        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if is_continuation(line) {
            self.print(&format!("> {}\n", line));
            self.multi_line.push(strip_continuation(line));
            return;
        }

        let command = if self.multi_line.is_empty() {
            line.to_string()
        } else {
            self.multi_line.push(line.to_string());
            let parts: Vec<String> = self
                .multi_line
                .drain(..)
                .filter(|part| !part.is_empty())
                .collect();
            parts.join(" ")
        };

        self.print(&format!("$ {}\n", command));
        self.history.append(&command);
        self.dispatch(&command);
    }

    fn dispatch(&mut self, command: &str) {
        if let Some(builtin) = Builtin::parse(command) {
            self.run_builtin(builtin);
            return;
        }

        if self.exec.is_none() {
            self.print_error(&CoreError::Unavailable);
            return;
        }

        if self.guard.blocks(command) {
            tracing::debug!(command, "refused interactive command");
            self.print(INTERACTIVE_WARNING);
            return;
        }

        let argv = Command::parse(command).into_argv();
        if argv.is_empty() {
            self.print("Error: invalid command\n");
            return;
        }

        tracing::debug!(container = %self.container_id, ?argv, "running shell command");
        let result = match self.exec.as_mut() {
            Some(exec) => exec(&self.container_id, &argv, false),
            None => Err(CoreError::Unavailable),
        };

        match result {
            Ok(output) => self.print_command_output(&output),
            Err(e) => {
                if let Some(output) = e.output() {
                    let output = output.to_string();
                    self.print_command_output(&output);
                }
                self.print_error(&e);
            }
        }
    }

    fn run_builtin(&mut self, builtin: Builtin) {
        match builtin {
            Builtin::Exit => {
                self.print(EXIT_MESSAGE);
                self.exit();
            }
            Builtin::Clear => {
                self.output.clear();
                self.write_banner();
            }
            Builtin::Help => self.print(HELP_TEXT),
        }
    }

    fn navigate(&mut self, direction: Direction, input: &mut dyn InputField) {
        if let Some(text) = self.history.navigate(direction, &input.text()) {
            input.set_text(&text);
        }
    }

    fn complete(&mut self, input: &mut dyn InputField) {
        let Some(exec) = self.exec.as_mut() else {
            return;
        };
        let text = input.text();
        let container_id = self.container_id.as_str();
        let mut probe = |argv: &[String]| exec(container_id, argv, false);

        match completion::complete(&text, &mut probe) {
            Completion::Unchanged => {}
            Completion::Replace(new_text) => input.set_text(&new_text),
            Completion::Listing(listing) => self.print(&listing),
        }
    }

    fn interrupt(&mut self, input: &mut dyn InputField) {
        self.multi_line.clear();
        input.set_text("");
        self.print("^C\n");
    }

    /// Enter the terminal state and notify the owner once
    pub fn exit(&mut self) {
        if self.exited {
            return;
        }
        self.exited = true;
        tracing::debug!(container = %self.container_id, "shell session exited");
        if let Some(on_exit) = self.on_exit.as_mut() {
            on_exit();
        }
    }

    fn write_banner(&mut self) {
        let banner = welcome_banner(&self.container_name, short_id(&self.container_id));
        self.print(&banner);
    }

    fn print(&mut self, text: &str) {
        self.output.append(text);
        self.output.scroll_to_end();
    }

    fn print_command_output(&mut self, output: &str) {
        if output.is_empty() {
            return;
        }
        self.print(output);
        if !output.ends_with('\n') {
            self.print("\n");
        }
    }

    fn print_error(&mut self, e: &CoreError) {
        self.print(&format!("Error: {}\n", e));
    }

    pub fn state(&self, input: &str) -> SessionState {
        if self.exited {
            SessionState::Exited
        } else if !self.multi_line.is_empty() {
            SessionState::MultiLine
        } else if input.is_empty() {
            SessionState::Idle
        } else {
            SessionState::Composing
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    pub fn output(&self) -> &OutputSink {
        &self.output
    }

    /// Mutable access for scrolling
    pub fn output_mut(&mut self) -> &mut OutputSink {
        &mut self.output
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn multi_line_buffer(&self) -> &[String] {
        &self.multi_line
    }

    pub fn is_exited(&self) -> bool {
        self.exited
    }
}
