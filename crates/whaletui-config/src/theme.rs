//! Color theme settings
//!
//! Colors are stored as names ("cyan", "darkgray", "#ff8800", "reset")
//! and converted by the TUI. An empty value means "use the built-in color".

use serde::{Deserialize, Serialize};

/// Theme configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub shell: ShellTheme,
}

/// Colors for the embedded shell view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellTheme {
    pub border: String,
    pub title: String,
    pub text: String,
    pub background: String,
    pub cmd: ShellCmdTheme,
}

impl Default for ShellTheme {
    fn default() -> Self {
        Self {
            border: "cyan".to_string(),
            title: "cyan".to_string(),
            text: "white".to_string(),
            background: "reset".to_string(),
            cmd: ShellCmdTheme::default(),
        }
    }
}

/// Colors for the shell command input line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellCmdTheme {
    pub label: String,
    pub border: String,
    pub text: String,
    pub background: String,
    pub placeholder: String,
}

impl Default for ShellCmdTheme {
    fn default() -> Self {
        Self {
            label: "green".to_string(),
            border: "gray".to_string(),
            text: "white".to_string(),
            background: "reset".to_string(),
            placeholder: "darkgray".to_string(),
        }
    }
}

impl ShellTheme {
    /// Overlay the non-empty values of `other` onto this theme
    pub fn merge_with(&mut self, other: &ShellTheme) {
        merge_field(&mut self.border, &other.border);
        merge_field(&mut self.title, &other.title);
        merge_field(&mut self.text, &other.text);
        merge_field(&mut self.background, &other.background);
        self.cmd.merge_with(&other.cmd);
    }
}

impl ShellCmdTheme {
    /// Overlay the non-empty values of `other` onto this theme
    pub fn merge_with(&mut self, other: &ShellCmdTheme) {
        merge_field(&mut self.label, &other.label);
        merge_field(&mut self.border, &other.border);
        merge_field(&mut self.text, &other.text);
        merge_field(&mut self.background, &other.background);
        merge_field(&mut self.placeholder, &other.placeholder);
    }
}

fn merge_field(target: &mut String, value: &str) {
    if !value.trim().is_empty() {
        *target = value.trim().to_string();
    }
}
