//! Refuses programs that need a real TTY before they hang the view

use std::collections::HashSet;

/// Programs that require a TTY or redraw the screen continuously
const INTERACTIVE_COMMANDS: &[&str] = &[
    // monitors and pagers
    "top", "htop", "watch", "less", "more", "man", "info",
    // editors
    "vim", "nano", "emacs",
    // curses front-ends and multiplexers
    "ncurses", "dialog", "whiptail", "screen", "tmux", "byobu",
    // remote shells and file transfer
    "mosh", "ssh", "telnet", "ftp", "sftp", "ncftp",
    // text browsers
    "lynx", "links", "w3m",
    // database clients and REPLs
    "mysql", "psql", "sqlite3", "redis-cli", "mongo", "irb", "python", "node",
    // debuggers and tracers
    "gdb", "lldb", "perf", "strace", "ltrace", "valgrind", "gprof",
];

pub const INTERACTIVE_WARNING: &str = "\
\u{26a0}\u{fe0f}  Warning: This is an interactive command that will freeze the TUI.
   Interactive commands require a real terminal with TTY support.
   Commands that will freeze:
   - top, htop, vim, nano, less, more
   - Any command that requires TTY input
   - Commands that update the screen continuously

   For non-interactive alternatives, try:
   - 'ps aux' instead of 'top'
   - 'cat' instead of 'less' or 'more'
   - 'ls -la' instead of interactive file managers
   - 'free -h' instead of interactive system monitors

";

/// Case-insensitive blocklist on the first token of a command
#[derive(Debug, Clone)]
pub struct InteractiveGuard {
    blocked: HashSet<String>,
}

impl InteractiveGuard {
    /// Built-in list extended with `extra` program names
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut blocked: HashSet<String> =
            INTERACTIVE_COMMANDS.iter().map(|c| c.to_string()).collect();
        for name in extra {
            let name = name.as_ref().trim().to_lowercase();
            if !name.is_empty() {
                blocked.insert(name);
            }
        }
        Self { blocked }
    }

    pub fn blocks(&self, command: &str) -> bool {
        command
            .split_whitespace()
            .next()
            .map(|first| self.blocked.contains(&first.to_lowercase()))
            .unwrap_or(false)
    }
}

impl Default for InteractiveGuard {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_known_programs() {
        let guard = InteractiveGuard::default();
        assert!(guard.blocks("top"));
        assert!(guard.blocks("vim file.txt"));
        assert!(guard.blocks("  htop -d 5"));
        assert!(guard.blocks("redis-cli"));
        assert!(guard.blocks("gprof a.out"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let guard = InteractiveGuard::default();
        assert!(guard.blocks("TOP"));
        assert!(guard.blocks("Vim notes"));
    }

    #[test]
    fn test_only_first_token_counts() {
        let guard = InteractiveGuard::default();
        assert!(!guard.blocks("ps aux"));
        assert!(!guard.blocks("echo top"));
        assert!(!guard.blocks("python3 script.py"));
        assert!(!guard.blocks(""));
    }

    #[test]
    fn test_extra_commands_extend_list() {
        let guard = InteractiveGuard::new(["K9s", " ", "lazygit"]);
        assert!(guard.blocks("k9s"));
        assert!(guard.blocks("lazygit log"));
        assert!(guard.blocks("top"));
    }

    #[test]
    fn test_warning_suggests_alternatives() {
        assert!(INTERACTIVE_WARNING.contains("'ps aux' instead of 'top'"));
        assert!(INTERACTIVE_WARNING.contains("'free -h'"));
    }
}
