//! Command classification: continuation lines and argv construction

/// Substrings that make a command run through `/bin/sh -c`
const SHELL_METACHARS: &[&str] = &["|", ">", "<", "&&", "||"];

/// Whether `line` continues on the next line (trimmed, ends with `\`)
pub fn is_continuation(line: &str) -> bool {
    line.trim().ends_with('\\')
}

/// Trimmed line with one trailing backslash removed
pub fn strip_continuation(line: &str) -> String {
    let trimmed = line.trim();
    trimmed
        .strip_suffix('\\')
        .unwrap_or(trimmed)
        .trim_end()
        .to_string()
}

/// A single unit of remote execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Whitespace-separated tokens passed as argv
    Argv(Vec<String>),
    /// Raw text handed to a POSIX shell
    Shell(String),
}

impl Command {
    /// Classify `text` by the presence of shell metacharacters
    ///
    /// Only whitespace splits tokens; quotes are passed through untouched.
    pub fn parse(text: &str) -> Self {
        if needs_shell(text) {
            Self::Shell(text.to_string())
        } else {
            Self::Argv(text.split_whitespace().map(str::to_string).collect())
        }
    }

    /// Argv to hand to the exec collaborator
    pub fn into_argv(self) -> Vec<String> {
        match self {
            Self::Argv(argv) => argv,
            Self::Shell(raw) => vec!["/bin/sh".to_string(), "-c".to_string(), raw],
        }
    }
}

pub fn needs_shell(text: &str) -> bool {
    SHELL_METACHARS.iter().any(|m| text.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuation_detection() {
        assert!(is_continuation("echo a \\"));
        assert!(is_continuation("echo a \\   "));
        assert!(!is_continuation("echo a"));
        assert!(!is_continuation("echo \\ a"));
    }

    #[test]
    fn test_strip_continuation() {
        assert_eq!(strip_continuation("  echo a \\  "), "echo a");
        assert_eq!(strip_continuation("\\"), "");
        assert_eq!(strip_continuation("ls"), "ls");
    }

    #[test]
    fn test_plain_command_splits_on_whitespace() {
        let cmd = Command::parse("ls   -la\t/tmp");
        assert_eq!(
            cmd.into_argv(),
            vec!["ls".to_string(), "-la".to_string(), "/tmp".to_string()]
        );
    }

    #[test]
    fn test_quotes_are_not_interpreted() {
        let argv = Command::parse("echo 'a b'").into_argv();
        assert_eq!(argv, vec!["echo", "'a", "b'"]);
    }

    #[test]
    fn test_metachars_use_shell() {
        for raw in [
            "ps aux | grep nginx",
            "echo hi > /tmp/x",
            "wc -l < /etc/passwd",
            "true && echo ok",
            "false || echo fallback",
        ] {
            let argv = Command::parse(raw).into_argv();
            assert_eq!(argv, vec!["/bin/sh", "-c", raw], "{}", raw);
        }
    }

    #[test]
    fn test_empty_text_yields_empty_argv() {
        assert!(Command::parse("   ").into_argv().is_empty());
    }
}
