//! Container runtimes behind one async trait
//!
//! Docker and Podman are both reached through the Docker Engine API, see
//! [`DockerProvider`].

mod docker;
mod error;
mod types;

pub use docker::DockerProvider;
pub use error::*;
pub use types::*;

use async_trait::async_trait;
use whaletui_config::GlobalConfig;

/// Operations the dashboard and the embedded shell need from a runtime
#[async_trait]
pub trait ContainerProvider: Send + Sync {
    /// Run a command to completion and collect its combined output
    async fn exec(&self, id: &ContainerId, config: &ExecConfig) -> Result<ExecResult>;

    /// List containers; `all` includes stopped ones
    async fn list(&self, all: bool) -> Result<Vec<ContainerInfo>>;

    async fn inspect(&self, id: &ContainerId) -> Result<ContainerDetails>;

    /// Stdout and stderr logs, the last `tail` lines or all of them
    async fn logs(&self, id: &ContainerId, tail: Option<usize>) -> Result<String>;

    async fn start(&self, id: &ContainerId) -> Result<()>;

    /// Stop, killing after `timeout` seconds
    async fn stop(&self, id: &ContainerId, timeout: Option<u32>) -> Result<()>;

    async fn ping(&self) -> Result<()>;

    fn info(&self) -> ProviderInfo;
}

/// Connect to the runtime of `provider_type` on its configured socket
pub async fn create_provider(
    provider_type: ProviderType,
    config: &GlobalConfig,
) -> Result<Box<dyn ContainerProvider>> {
    let socket = config.socket_for(provider_type.as_str());
    let provider = match provider_type {
        ProviderType::Docker => DockerProvider::new(socket).await?,
        ProviderType::Podman => DockerProvider::new_podman(socket).await?,
    };
    Ok(Box::new(provider))
}

/// Whether the runtime answers a ping
pub async fn test_provider_connectivity(provider_type: ProviderType, config: &GlobalConfig) -> bool {
    match create_provider(provider_type, config).await {
        Ok(provider) => provider.ping().await.is_ok(),
        Err(e) => {
            tracing::debug!(runtime = %provider_type, error = %e, "not reachable");
            false
        }
    }
}

/// Probe both runtimes concurrently; Docker comes first
pub async fn detect_available_providers(config: &GlobalConfig) -> Vec<(ProviderType, bool)> {
    let (docker, podman) = tokio::join!(
        test_provider_connectivity(ProviderType::Docker, config),
        test_provider_connectivity(ProviderType::Podman, config)
    );
    vec![(ProviderType::Docker, docker), (ProviderType::Podman, podman)]
}

/// Runtime named by `defaults.provider`, probing when it is empty
async fn configured_provider_type(config: &GlobalConfig) -> ProviderType {
    let configured = config.defaults.provider.as_str();
    if !configured.is_empty() {
        return configured.parse().unwrap_or_else(|e: String| {
            tracing::warn!("{}, using Docker", e);
            ProviderType::Docker
        });
    }

    tracing::info!("No provider configured, auto-detecting");
    let detected = detect_available_providers(config)
        .await
        .into_iter()
        .find_map(|(provider_type, up)| up.then_some(provider_type));

    match detected {
        Some(provider_type) => {
            tracing::info!(runtime = %provider_type, "auto-detected");
            provider_type
        }
        None => {
            // Docker's error message is the more familiar one
            tracing::warn!("No runtime detected, falling back to Docker");
            ProviderType::Docker
        }
    }
}

/// Connect to the configured runtime, with an actionable message on failure
pub async fn create_default_provider(config: &GlobalConfig) -> Result<Box<dyn ContainerProvider>> {
    let provider_type = configured_provider_type(config).await;

    create_provider(provider_type, config).await.map_err(|e| {
        let socket = config.socket_for(provider_type.as_str());
        let socket_exists = std::path::Path::new(socket).exists();
        ProviderError::ConnectionError(format_connection_error(
            provider_type,
            socket,
            socket_exists,
            &e,
        ))
    })
}

fn format_connection_error(
    provider: ProviderType,
    socket: &str,
    socket_exists: bool,
    underlying: &ProviderError,
) -> String {
    let name = provider.display_name();
    let mut lines = vec![format!("Cannot connect to {}", name), String::new()];

    if socket_exists {
        lines.push(format!(
            "The socket exists at {} but the daemon is not responding.",
            socket
        ));
        lines.push(String::new());
        lines.push(format!("Underlying error: {}", underlying));
    } else {
        lines.push(format!("The {} API socket was not found at:", name));
        lines.push(format!("  {}", socket));
        lines.push(String::new());
        let hint = match provider {
            ProviderType::Docker => "  sudo systemctl enable --now docker",
            ProviderType::Podman => "  systemctl --user enable --now podman.socket",
        };
        lines.push(format!("To start {}, run:", name));
        lines.push(hint.to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_missing_socket() {
        let err = ProviderError::ConnectionError("refused".to_string());
        let msg = format_connection_error(ProviderType::Podman, "/nope.sock", false, &err);
        assert!(msg.starts_with("Cannot connect to Podman"));
        assert!(msg.contains("/nope.sock"));
        assert!(msg.contains("podman.socket"));
        assert!(!msg.contains("refused"));
    }

    #[test]
    fn test_connection_error_daemon_down() {
        let err = ProviderError::ConnectionError("refused".to_string());
        let msg = format_connection_error(ProviderType::Docker, "/var/run/docker.sock", true, &err);
        assert!(msg.contains("not responding"));
        assert!(msg.contains("refused"));
    }

    #[tokio::test]
    async fn test_configured_type_skips_detection() {
        let mut config = GlobalConfig::default();
        config.defaults.provider = "Podman".to_string();
        assert_eq!(configured_provider_type(&config).await, ProviderType::Podman);

        config.defaults.provider = "rkt".to_string();
        assert_eq!(configured_provider_type(&config).await, ProviderType::Docker);
    }

    #[tokio::test]
    async fn test_unreachable_socket_reports_connection_error() {
        let mut config = GlobalConfig::default();
        config.defaults.provider = "docker".to_string();
        config.providers.docker.socket = "/definitely/not/a/docker.sock".to_string();

        let err = match create_default_provider(&config).await {
            Ok(_) => panic!("connecting to a missing socket should fail"),
            Err(e) => e,
        };
        assert!(matches!(err, ProviderError::ConnectionError(_)));
        assert!(err.to_string().contains("/definitely/not/a/docker.sock"));
    }
}
