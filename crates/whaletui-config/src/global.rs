//! Global configuration for whaletui
//!
//! Located at `~/.config/whaletui/config.toml`

use crate::{ConfigError, Result, ThemeConfig};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Global whaletui configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub defaults: DefaultsConfig,
    pub providers: ProvidersConfig,
    pub logging: LoggingConfig,
    pub shell: ShellConfig,
    pub theme: ThemeConfig,
}

/// Default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default container provider ("docker" or "podman", empty to auto-detect)
    pub provider: String,
    /// Seconds between container list refreshes in the dashboard
    pub refresh_interval: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            provider: String::new(),
            refresh_interval: 5,
        }
    }
}

/// Socket settings per container runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub docker: RuntimeConfig,
    pub podman: RuntimeConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            docker: RuntimeConfig::at(docker_socket()),
            podman: RuntimeConfig::at(podman_socket()),
        }
    }
}

/// Connection settings for one runtime
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Unix socket path, named pipe or tcp:// URL
    pub socket: String,
}

impl RuntimeConfig {
    fn at(socket: impl Into<String>) -> Self {
        Self {
            socket: socket.into(),
        }
    }
}

fn docker_socket() -> String {
    if cfg!(windows) {
        "//./pipe/docker_engine".to_string()
    } else {
        "/var/run/docker.sock".to_string()
    }
}

fn podman_socket() -> String {
    if cfg!(windows) {
        return "//./pipe/podman-machine-default".to_string();
    }
    if cfg!(target_os = "macos") {
        return BaseDirs::new()
            .map(|dirs| {
                dirs.home_dir()
                    .join(".local/share/containers/podman/machine/podman-machine-default/podman.sock")
                    .display()
                    .to_string()
            })
            .unwrap_or_else(|| "/var/run/podman.sock".to_string());
    }
    match std::env::var("XDG_RUNTIME_DIR") {
        Ok(runtime_dir) => format!("{}/podman/podman.sock", runtime_dir),
        Err(_) => "/run/user/1000/podman/podman.sock".to_string(),
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive for tracing (e.g. "info", "whaletui_core=debug")
    pub level: String,
    /// Log file used while the dashboard owns the terminal.
    /// Without one, the dashboard does not log at all.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Embedded shell options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Additional program names refused by the interactive-command guard
    pub extra_interactive_commands: Vec<String>,
}

impl GlobalConfig {
    /// Load from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::io(path, e)),
        };

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            provider = %config.defaults.provider,
            "loaded config"
        );
        Ok(config)
    }

    /// Reject values the dashboard cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.defaults.refresh_interval == 0 {
            return Err(ConfigError::Invalid(
                "defaults.refresh_interval must be at least 1 second".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level is empty".to_string()));
        }
        Ok(())
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Write to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| ConfigError::io(path, e))?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::io(path, e))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "whaletui").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Check if no provider has been chosen yet
    pub fn is_first_run(&self) -> bool {
        self.defaults.provider.is_empty()
    }

    /// Socket configured for the given provider name
    pub fn socket_for(&self, provider: &str) -> &str {
        match provider {
            "podman" => &self.providers.podman.socket,
            _ => &self.providers.docker.socket,
        }
    }
}
