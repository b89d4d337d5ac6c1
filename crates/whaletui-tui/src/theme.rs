//! Resolves configured color names into ratatui colors

use ratatui::style::Color;
use std::str::FromStr;
use whaletui_config::{ShellTheme, ThemeConfig};

/// Colors used by the shell view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellColors {
    pub border: Color,
    pub title: Color,
    pub text: Color,
    pub background: Color,
    pub cmd_label: Color,
    pub cmd_border: Color,
    pub cmd_text: Color,
    pub cmd_background: Color,
    pub cmd_placeholder: Color,
}

impl ShellColors {
    /// Configured colors over the defaults; unparseable names keep the default
    pub fn from_config(theme: &ThemeConfig) -> Self {
        let defaults = ShellTheme::default();
        let mut merged = defaults.clone();
        merged.merge_with(&theme.shell);

        let pick = |value: &str, fallback: &str| {
            Color::from_str(value).unwrap_or_else(|_| {
                tracing::warn!("invalid theme color {:?}, using {:?}", value, fallback);
                Color::from_str(fallback).unwrap_or(Color::Reset)
            })
        };

        Self {
            border: pick(&merged.border, &defaults.border),
            title: pick(&merged.title, &defaults.title),
            text: pick(&merged.text, &defaults.text),
            background: pick(&merged.background, &defaults.background),
            cmd_label: pick(&merged.cmd.label, &defaults.cmd.label),
            cmd_border: pick(&merged.cmd.border, &defaults.cmd.border),
            cmd_text: pick(&merged.cmd.text, &defaults.cmd.text),
            cmd_background: pick(&merged.cmd.background, &defaults.cmd.background),
            cmd_placeholder: pick(&merged.cmd.placeholder, &defaults.cmd.placeholder),
        }
    }
}

impl Default for ShellColors {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}
