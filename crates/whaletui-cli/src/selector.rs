//! Interactive container picker for `whaletui shell`

use anyhow::{bail, Result};
use crossterm::{
    cursor::{self, MoveToColumn, MoveUp},
    event::{self, Event, KeyCode, KeyEventKind},
    style::{Color, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use std::io::{stdout, IsTerminal, Stdout, Write};
use whaletui_provider::ContainerInfo;

const HELP_LINE: &str = "[↑/↓ or j/k to move, Enter to select, Esc to cancel]";

/// Restores cooked mode on drop
struct RawModeGuard {
    was_raw: bool,
}

impl RawModeGuard {
    fn new() -> Result<Self> {
        let was_raw = terminal::is_raw_mode_enabled()?;
        if !was_raw {
            terminal::enable_raw_mode()?;
        }
        Ok(Self { was_raw })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if !self.was_raw {
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// Pick one of the running containers; returns its id
pub fn select_running_container(containers: &[ContainerInfo], prompt: &str) -> Result<String> {
    if !std::io::stdin().is_terminal() {
        bail!("Cannot show interactive selector: not a TTY. Specify container name as argument.");
    }

    let running: Vec<&ContainerInfo> = containers
        .iter()
        .filter(|c| c.status.is_running())
        .collect();

    if running.is_empty() {
        bail!("No running containers found. Use 'whaletui list --all' to see all containers.");
    }

    let _guard = RawModeGuard::new()?;
    let mut stdout = stdout();
    let total = running.len();
    let mut selected = 0usize;

    stdout.execute(cursor::Hide)?;
    write!(stdout, "{}\r\n", prompt)?;
    draw_items(&mut stdout, &running, selected)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                selected = selected.checked_sub(1).unwrap_or(total - 1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                selected = (selected + 1) % total;
            }
            KeyCode::Enter => {
                erase(&mut stdout, total)?;
                return Ok(running[selected].id.0.clone());
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                erase(&mut stdout, total)?;
                bail!("Selection cancelled");
            }
            _ => continue,
        }

        // Back to the first item line: items plus the blank line above the help
        stdout.execute(MoveUp((total + 1) as u16))?;
        stdout.execute(MoveToColumn(0))?;
        draw_items(&mut stdout, &running, selected)?;
    }
}

/// Items, a blank line and the help line; the cursor ends on the help line
fn draw_items(stdout: &mut Stdout, items: &[&ContainerInfo], selected: usize) -> Result<()> {
    for (i, container) in items.iter().enumerate() {
        stdout.execute(Clear(ClearType::CurrentLine))?;
        if i == selected {
            stdout.execute(SetForegroundColor(Color::White))?;
            write!(stdout, "> ")?;
        } else {
            write!(stdout, "  ")?;
        }

        stdout.execute(SetForegroundColor(Color::Green))?;
        write!(stdout, "●")?;
        stdout.execute(ResetColor)?;

        if i == selected {
            stdout.execute(SetForegroundColor(Color::White))?;
        }
        write!(stdout, " {:<24}", container.name)?;
        stdout.execute(SetForegroundColor(Color::DarkGrey))?;
        write!(stdout, "{}  {}", container.id.short(), container.image)?;
        stdout.execute(ResetColor)?;
        write!(stdout, "\r\n")?;
    }

    stdout.execute(Clear(ClearType::CurrentLine))?;
    write!(stdout, "\r\n")?;
    stdout.execute(Clear(ClearType::CurrentLine))?;
    stdout.execute(SetForegroundColor(Color::DarkGrey))?;
    write!(stdout, "{}", HELP_LINE)?;
    stdout.execute(ResetColor)?;
    stdout.flush()?;
    Ok(())
}

/// Remove the prompt, items, blank and help lines and show the cursor
fn erase(stdout: &mut Stdout, total: usize) -> Result<()> {
    let lines = total + 3;
    stdout.execute(MoveUp((lines - 1) as u16))?;
    stdout.execute(MoveToColumn(0))?;
    for _ in 0..lines {
        stdout.execute(Clear(ClearType::CurrentLine))?;
        write!(stdout, "\r\n")?;
    }
    stdout.execute(MoveUp(lines as u16))?;
    stdout.execute(cursor::Show)?;
    stdout.flush()?;
    Ok(())
}
