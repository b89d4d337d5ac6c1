//! Command history with draft preservation

/// Direction of a history move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards older entries
    Up,
    /// Towards newer entries and finally the draft
    Down,
}

/// Submitted commands plus a cursor in `0..=len`
///
/// A cursor equal to `len` means "not browsing": the input shows the draft,
/// the text the user was typing before the first move up.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
    draft: String,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command unless it is empty or repeats the last entry.
    /// The cursor always returns to the draft position.
    pub fn append(&mut self, command: &str) {
        if !command.is_empty() && self.entries.last().map(String::as_str) != Some(command) {
            self.entries.push(command.to_string());
        }
        self.cursor = self.entries.len();
    }

    /// Move the cursor and return the text the input should show.
    ///
    /// `current` is the text in the input right now; it becomes the draft
    /// when leaving the draft position. Returns `None` when nothing changes.
    pub fn navigate(&mut self, direction: Direction, current: &str) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        let len = self.entries.len();
        match direction {
            Direction::Up => {
                if self.cursor == len {
                    self.draft = current.to_string();
                }
                self.cursor = self.cursor.saturating_sub(1);
            }
            Direction::Down => {
                if self.cursor == len {
                    return None;
                }
                self.cursor += 1;
            }
        }

        Some(self.current_text())
    }

    fn current_text(&self) -> String {
        self.entries
            .get(self.cursor)
            .cloned()
            .unwrap_or_else(|| self.draft.clone())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True while an entry (not the draft) is shown
    pub fn is_browsing(&self) -> bool {
        self.cursor < self.entries.len()
    }
}
