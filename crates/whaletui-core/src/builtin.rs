//! Built-in shell commands handled locally

/// Commands intercepted before the guard and remote dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Clear,
    Help,
}

impl Builtin {
    /// Exact match on the whole command text
    pub fn parse(command: &str) -> Option<Self> {
        match command {
            "exit" | "quit" => Some(Self::Exit),
            "clear" => Some(Self::Clear),
            "help" => Some(Self::Help),
            _ => None,
        }
    }
}

/// Banner shown when a session starts and after `clear`
pub fn welcome_banner(name: &str, short_id: &str) -> String {
    format!(
        "Welcome to shell for container: {} ({})\n\
         Type 'exit' or press ESC to return to container view\n\n",
        name, short_id
    )
}

pub const HELP_TEXT: &str = "\
Shell Commands:
==============
Built-in commands:
  exit, quit    - Exit shell and return to container view
  clear         - Clear shell output
  help          - Show this help message

Navigation:
  Up/Down arrows - Navigate command history
  Tab           - Smart tab completion
  PageUp/PageDown - Scroll output
  Ctrl+C        - Discard the current input
  ESC           - Exit shell

Multi-line commands:
  End line with \\ to continue on next line
  Example: echo 'Hello' \\
           && echo 'World'

\u{26a0}\u{fe0f}  Interactive Commands:
  Commands like 'top', 'vim', 'less' will freeze the TUI
  These require a real terminal with TTY support
  Use alternatives: 'ps aux' instead of 'top'

Any other command will be executed in the container.

";

pub const EXIT_MESSAGE: &str = "Exiting shell...\n";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_match_only() {
        assert_eq!(Builtin::parse("exit"), Some(Builtin::Exit));
        assert_eq!(Builtin::parse("quit"), Some(Builtin::Exit));
        assert_eq!(Builtin::parse("clear"), Some(Builtin::Clear));
        assert_eq!(Builtin::parse("help"), Some(Builtin::Help));
        assert_eq!(Builtin::parse("exit 1"), None);
        assert_eq!(Builtin::parse("EXIT"), None);
        assert_eq!(Builtin::parse("helpme"), None);
    }

    #[test]
    fn test_welcome_banner() {
        assert_eq!(
            welcome_banner("web", "0123456789ab"),
            "Welcome to shell for container: web (0123456789ab)\n\
             Type 'exit' or press ESC to return to container view\n\n"
        );
    }

    #[test]
    fn test_help_sections() {
        for heading in [
            "Built-in commands:",
            "Navigation:",
            "Multi-line commands:",
            "Interactive Commands:",
        ] {
            assert!(HELP_TEXT.contains(heading), "{}", heading);
        }
        assert!(HELP_TEXT.contains("End line with \\ to continue"));
    }
}
