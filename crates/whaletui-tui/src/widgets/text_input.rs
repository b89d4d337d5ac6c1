//! Text input state for the shell command line
//!
//! Cursor-based editing happens here; the shell session reads and replaces
//! the whole text through [`InputField`].

use whaletui_core::InputField;

/// State for a single-line command input with cursor support
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The command being edited
    buffer: String,
    /// Current cursor position (byte offset, always on a char boundary)
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input holding `value` with the cursor at the end
    pub fn with_value(value: &str) -> Self {
        let mut input = Self::new();
        input.set_value(value);
        input
    }

    /// Replace the text; the cursor moves to the end
    pub fn set_value(&mut self, value: &str) {
        self.buffer = value.to_string();
        self.cursor = self.buffer.len();
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in characters, for placing the terminal cursor
    pub fn cursor_column(&self) -> usize {
        self.before_cursor().chars().count()
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character under the cursor (Delete)
    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    /// Delete the character before the cursor (Backspace)
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_char_boundary();
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the word before the cursor plus any whitespace after it (Ctrl+W)
    pub fn delete_word(&mut self) {
        let before = self.before_cursor();
        let trimmed = before.trim_end();
        let start = trimmed
            .rfind(char::is_whitespace)
            .map(|idx| idx + trimmed[idx..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    /// Delete everything before the cursor (Ctrl+U)
    pub fn clear_to_start(&mut self) {
        self.buffer.replace_range(..self.cursor, "");
        self.cursor = 0;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_char_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor = self.next_char_boundary();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn before_cursor(&self) -> &str {
        &self.buffer[..self.cursor]
    }

    pub fn after_cursor(&self) -> &str {
        &self.buffer[self.cursor..]
    }

    fn prev_char_boundary(&self) -> usize {
        let mut idx = self.cursor.saturating_sub(1);
        while idx > 0 && !self.buffer.is_char_boundary(idx) {
            idx -= 1;
        }
        idx
    }

    fn next_char_boundary(&self) -> usize {
        let mut idx = self.cursor + 1;
        while idx < self.buffer.len() && !self.buffer.is_char_boundary(idx) {
            idx += 1;
        }
        idx.min(self.buffer.len())
    }
}

impl InputField for TextInputState {
    fn text(&self) -> String {
        self.buffer.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.set_value(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_builds_command() {
        let mut input = TextInputState::new();
        for c in "ls -la".chars() {
            input.insert(c);
        }
        assert_eq!(input.value(), "ls -la");
        assert_eq!(input.cursor(), 6);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInputState::with_value("l -la");
        input.home();
        input.move_right();
        input.insert('s');
        assert_eq!(input.value(), "ls -la");
        assert_eq!(input.before_cursor(), "ls");
        assert_eq!(input.after_cursor(), " -la");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = TextInputState::with_value("cat");
        input.backspace();
        assert_eq!(input.value(), "ca");

        input.home();
        input.delete();
        assert_eq!(input.value(), "a");
        assert_eq!(input.cursor(), 0);

        input.backspace();
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_cursor_movement_is_clamped() {
        let mut input = TextInputState::with_value("pwd");
        input.move_right();
        assert_eq!(input.cursor(), 3);
        input.home();
        input.move_left();
        assert_eq!(input.cursor(), 0);
        input.end();
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_delete_word() {
        let mut input = TextInputState::with_value("grep -r needle  ");
        input.delete_word();
        assert_eq!(input.value(), "grep -r ");
        input.delete_word();
        assert_eq!(input.value(), "grep ");
        input.delete_word();
        assert_eq!(input.value(), "");
        input.delete_word();
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_clear_to_start_keeps_tail() {
        let mut input = TextInputState::with_value("echo hello");
        input.home();
        for _ in 0..5 {
            input.move_right();
        }
        input.clear_to_start();
        assert_eq!(input.value(), "hello");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInputState::with_value("cat café");
        assert_eq!(input.cursor_column(), 8);
        input.backspace();
        assert_eq!(input.value(), "cat caf");
        input.insert('\u{00e8}');
        input.move_left();
        assert_eq!(input.cursor_column(), 7);
        assert_eq!(input.after_cursor(), "\u{00e8}");
    }

    #[test]
    fn test_input_field_moves_cursor_to_end() {
        let mut input = TextInputState::with_value("cd da");
        input.home();
        InputField::set_text(&mut input, "cd data/");
        assert_eq!(InputField::text(&input), "cd data/");
        assert_eq!(input.cursor(), 8);
    }
}
