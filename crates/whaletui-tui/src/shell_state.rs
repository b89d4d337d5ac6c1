//! Shell view state: a core session plus the widget-side input line

use crate::widgets::TextInputState;
use crossterm::event::{KeyCode, KeyModifiers};
use whaletui_core::{Session, ShellKey};

/// Lines moved per PageUp/PageDown
const PAGE: usize = 10;

/// The shell view for one container
pub struct ShellView {
    pub session: Session,
    pub input: TextInputState,
}

impl ShellView {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            input: TextInputState::new(),
        }
    }

    /// Route a key to the session or the input line
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match code {
                KeyCode::Char('c') => self.send(ShellKey::Interrupt),
                KeyCode::Char('w') => self.input.delete_word(),
                KeyCode::Char('u') => self.input.clear_to_start(),
                KeyCode::Char('a') => self.input.home(),
                KeyCode::Char('e') => self.input.end(),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Enter => self.send(ShellKey::Enter),
            KeyCode::Esc => self.send(ShellKey::Escape),
            KeyCode::Up => self.send(ShellKey::Up),
            KeyCode::Down => self.send(ShellKey::Down),
            KeyCode::Tab => self.send(ShellKey::Tab),
            KeyCode::PageUp => self.session.output_mut().scroll_up(PAGE),
            KeyCode::PageDown => self.session.output_mut().scroll_down(PAGE),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.home(),
            KeyCode::End => self.input.end(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Char(c) => self.input.insert(c),
            _ => {}
        }
    }

    fn send(&mut self, key: ShellKey) {
        self.session.handle_key(key, &mut self.input);
    }
}
