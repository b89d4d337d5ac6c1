//! Values exchanged with container runtimes

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Full container id as reported by the runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The 12 character form `docker ps` prints
    pub fn short(&self) -> &str {
        short_id(&self.0)
    }
}

/// First 12 characters of a raw container id
pub fn short_id(id: &str) -> &str {
    id.char_indices()
        .nth(12)
        .map_or(id, |(end, _)| &id[..end])
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which runtime answers on the socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Docker,
    Podman,
}

impl ProviderType {
    /// Config and command-line spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Podman => "podman",
        }
    }

    /// Product name for messages
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Docker => "Docker",
            Self::Podman => "Podman",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Docker, Self::Podman]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown provider type: {}", s))
    }
}

/// Lifecycle state of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    Unknown,
}

impl ContainerStatus {
    const ALL: [ContainerStatus; 8] = [
        Self::Created,
        Self::Running,
        Self::Paused,
        Self::Restarting,
        Self::Removing,
        Self::Exited,
        Self::Dead,
        Self::Unknown,
    ];

    /// Only running containers accept exec
    pub fn is_running(&self) -> bool {
        *self == Self::Running
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Restarting => "restarting",
            Self::Removing => "removing",
            Self::Exited => "exited",
            Self::Dead => "dead",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ContainerStatus {
    fn from(state: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(state.trim()))
            .unwrap_or(Self::Unknown)
    }
}

/// A one-shot, non-interactive exec request
#[derive(Debug, Clone, Default)]
pub struct ExecConfig {
    pub cmd: Vec<String>,
    /// Directory to run in; the image's working dir when unset
    pub working_dir: Option<String>,
    /// User to run as; the container's user when unset
    pub user: Option<String>,
    pub tty: bool,
}

impl ExecConfig {
    /// Exec of `cmd` with the container's defaults and no TTY
    pub fn command(cmd: Vec<String>) -> Self {
        Self {
            cmd,
            ..Self::default()
        }
    }

    pub fn in_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn as_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

/// What a finished exec produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    pub exit_code: i64,
    /// stdout and stderr interleaved as received
    pub output: String,
}

/// One row of a container listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub id: ContainerId,
    pub name: String,
    pub image: String,
    pub status: ContainerStatus,
    /// Runtime's own wording, e.g. "Up 3 hours"
    pub status_text: String,
    /// Unix timestamp
    pub created: i64,
    pub labels: HashMap<String, String>,
}

impl ContainerInfo {
    /// Runtime wording when available, else the bare state
    pub fn state_label(&self) -> String {
        if self.status_text.is_empty() {
            self.status.to_string()
        } else {
            self.status_text.clone()
        }
    }
}

/// Result of inspecting a single container
#[derive(Debug, Clone)]
pub struct ContainerDetails {
    pub id: ContainerId,
    pub name: String,
    pub image: String,
    pub status: ContainerStatus,
    /// RFC 3339 creation time
    pub created: Option<String>,
    pub working_dir: Option<String>,
    pub user: Option<String>,
    pub env: Vec<String>,
    /// Entrypoint followed by cmd
    pub command: Vec<String>,
    /// Published ports, e.g. `80/tcp -> 0.0.0.0:8080`
    pub ports: Vec<String>,
    pub labels: HashMap<String, String>,
}

/// Runtime identification shown in the dashboard header
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    pub provider_type: ProviderType,
    pub version: String,
    pub api_version: String,
    pub os: String,
    pub arch: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(status: ContainerStatus, status_text: &str) -> ContainerInfo {
        ContainerInfo {
            id: ContainerId::new("f00dbabe1234567890"),
            name: "web".to_string(),
            image: "nginx:latest".to_string(),
            status,
            status_text: status_text.to_string(),
            created: 1_700_000_000,
            labels: HashMap::new(),
        }
    }

    #[test]
    fn test_short_id() {
        assert_eq!(ContainerId::new("0123456789abcdef0123").short(), "0123456789ab");
        assert_eq!(ContainerId::new("abc").short(), "abc");
        assert_eq!(short_id("0123456789abcdef"), "0123456789ab");
    }

    #[test]
    fn test_provider_type_parse() {
        assert_eq!("Docker".parse::<ProviderType>(), Ok(ProviderType::Docker));
        assert_eq!("podman".parse::<ProviderType>(), Ok(ProviderType::Podman));
        assert_eq!(
            "lxc".parse::<ProviderType>(),
            Err("Unknown provider type: lxc".to_string())
        );
    }

    #[test]
    fn test_status_from_runtime_state() {
        assert_eq!(ContainerStatus::from("running"), ContainerStatus::Running);
        assert_eq!(ContainerStatus::from("Exited"), ContainerStatus::Exited);
        assert_eq!(ContainerStatus::from("weird"), ContainerStatus::Unknown);
        assert!(ContainerStatus::Running.is_running());
        assert!(!ContainerStatus::Paused.is_running());
    }

    #[test]
    fn test_state_label_prefers_runtime_wording() {
        assert_eq!(info(ContainerStatus::Running, "Up 2 minutes").state_label(), "Up 2 minutes");
        assert_eq!(info(ContainerStatus::Exited, "").state_label(), "exited");
    }

    #[test]
    fn test_exec_config_builders() {
        let config = ExecConfig::command(vec!["pwd".to_string()])
            .in_dir("/srv")
            .as_user("www-data");
        assert_eq!(config.working_dir.as_deref(), Some("/srv"));
        assert_eq!(config.user.as_deref(), Some("www-data"));
        assert!(!config.tty);
    }

    #[test]
    fn test_container_info_json_shape() {
        let json = serde_json::to_value(info(ContainerStatus::Exited, "Exited (0)")).unwrap();
        assert_eq!(json["id"], "f00dbabe1234567890");
        assert_eq!(json["status"], "exited");
        assert_eq!(json["status_text"], "Exited (0)");
    }
}
