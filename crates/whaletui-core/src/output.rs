//! Append-only output buffer for the shell view

/// Text sink that receives everything the shell shows the user
///
/// The sink only grows; `clear` is the single way to drop text. Rendering
/// keeps the view pinned to the end while `follow` is set and otherwise
/// shows the window `scroll` lines from the end.
#[derive(Debug, Clone)]
pub struct OutputSink {
    text: String,
    follow: bool,
    scroll: usize,
}

impl OutputSink {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            follow: true,
            scroll: 0,
        }
    }

    /// Append text verbatim
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Pin the view to the newest output again
    pub fn scroll_to_end(&mut self) {
        self.follow = true;
        self.scroll = 0;
    }

    /// Scroll towards older output by `lines`
    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.line_count().saturating_sub(1);
        self.scroll = (self.scroll + lines).min(max);
        self.follow = self.scroll == 0;
    }

    /// Scroll towards newer output by `lines`
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
        self.follow = self.scroll == 0;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.scroll_to_end();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Lines between the current view position and the end
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Top line to render in a pane of `height` rows
    pub fn top_line(&self, height: usize) -> usize {
        self.line_count()
            .saturating_sub(height)
            .saturating_sub(self.scroll)
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_accumulates() {
        let mut sink = OutputSink::new();
        sink.append("a\n");
        sink.append("b");
        sink.append("c\n");
        assert_eq!(sink.text(), "a\nbc\n");
        assert_eq!(sink.line_count(), 2);
    }

    #[test]
    fn test_clear_resets_scroll() {
        let mut sink = OutputSink::new();
        sink.append("1\n2\n3\n");
        sink.scroll_up(2);
        assert!(!sink.is_following());

        sink.clear();
        assert_eq!(sink.text(), "");
        assert!(sink.is_following());
        assert_eq!(sink.scroll_offset(), 0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut sink = OutputSink::new();
        for i in 0..10 {
            sink.append(&format!("line {}\n", i));
        }

        sink.scroll_up(100);
        assert_eq!(sink.scroll_offset(), 9);

        sink.scroll_down(4);
        assert_eq!(sink.scroll_offset(), 5);

        sink.scroll_down(100);
        assert!(sink.is_following());
    }

    #[test]
    fn test_top_line() {
        let mut sink = OutputSink::new();
        for i in 0..10 {
            sink.append(&format!("line {}\n", i));
        }
        assert_eq!(sink.top_line(4), 6);
        sink.scroll_up(3);
        assert_eq!(sink.top_line(4), 3);
        assert_eq!(sink.top_line(20), 0);
    }
}
