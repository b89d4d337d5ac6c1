//! Docker Engine API client, shared by Docker and Podman
//!
//! Podman exposes a Docker-compatible API on its service socket, so one
//! bollard client serves both runtimes.

use crate::{
    ContainerDetails, ContainerId, ContainerInfo, ContainerProvider, ContainerStatus, ExecConfig,
    ExecResult, ProviderError, ProviderInfo, ProviderType, Result,
};
use async_trait::async_trait;
use bollard::container::{
    ListContainersOptions, LogOutput, LogsOptions, StartContainerOptions, StopContainerOptions,
};
use bollard::exec::{CreateExecOptions, StartExecOptions, StartExecResults};
use bollard::models::{ContainerInspectResponse, ContainerSummary, PortMap};
use bollard::Docker;
use futures::{Stream, StreamExt};

/// Seconds bollard waits on a single request
const REQUEST_TIMEOUT: u64 = 120;

/// How a socket setting is reached
#[derive(Debug, PartialEq, Eq)]
enum Endpoint<'a> {
    /// Unix socket or Windows named pipe
    Local(&'a str),
    /// HTTP URL, with `tcp://` rewritten
    Http(String),
}

fn endpoint(socket: &str) -> Endpoint<'_> {
    if let Some(path) = socket.strip_prefix("unix://") {
        return Endpoint::Local(path);
    }
    if let Some(rest) = socket.strip_prefix("tcp://") {
        return Endpoint::Http(format!("http://{}", rest));
    }
    if socket.starts_with("http://") || socket.starts_with("https://") {
        return Endpoint::Http(socket.to_string());
    }
    Endpoint::Local(socket)
}

/// Container provider over the Docker Engine API
pub struct DockerProvider {
    client: Docker,
    info: ProviderInfo,
}

impl DockerProvider {
    /// Connect to Docker at `socket` and check the daemon answers
    pub async fn new(socket: &str) -> Result<Self> {
        Self::connect(socket, ProviderType::Docker).await
    }

    /// Connect to Podman's Docker-compatible service at `socket`
    pub async fn new_podman(socket: &str) -> Result<Self> {
        Self::connect(socket, ProviderType::Podman).await
    }

    async fn connect(socket: &str, provider_type: ProviderType) -> Result<Self> {
        let client = match endpoint(socket) {
            Endpoint::Local(path) => {
                Docker::connect_with_socket(path, REQUEST_TIMEOUT, bollard::API_DEFAULT_VERSION)
            }
            Endpoint::Http(url) => {
                Docker::connect_with_http(&url, REQUEST_TIMEOUT, bollard::API_DEFAULT_VERSION)
            }
        }
        .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        client
            .ping()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let mut info = ProviderInfo {
            provider_type,
            version: "unknown".to_string(),
            api_version: bollard::API_DEFAULT_VERSION.to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        };
        match client.version().await {
            Ok(version) => {
                info.version = version.version.unwrap_or(info.version);
                info.api_version = version.api_version.unwrap_or(info.api_version);
                info.os = version.os.unwrap_or(info.os);
                info.arch = version.arch.unwrap_or(info.arch);
            }
            Err(e) => tracing::debug!(error = %e, "version query failed"),
        }

        tracing::debug!(%socket, runtime = %provider_type, version = %info.version, "connected");
        Ok(Self { client, info })
    }
}

/// Drain an attached exec stream into one string, stdout and stderr interleaved
async fn collect_output<S>(mut stream: S) -> std::result::Result<String, bollard::errors::Error>
where
    S: Stream<Item = std::result::Result<LogOutput, bollard::errors::Error>> + Unpin,
{
    let mut output = String::new();
    while let Some(chunk) = stream.next().await {
        match chunk? {
            LogOutput::StdOut { message }
            | LogOutput::StdErr { message }
            | LogOutput::Console { message } => {
                output.push_str(&String::from_utf8_lossy(&message));
            }
            LogOutput::StdIn { .. } => {}
        }
    }
    Ok(output)
}

fn strip_slash(name: &str) -> String {
    name.trim_start_matches('/').to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<ContainerSummary> for ContainerInfo {
    fn from(summary: ContainerSummary) -> Self {
        let name = summary
            .names
            .as_deref()
            .and_then(|names| names.first())
            .map(|n| strip_slash(n))
            .unwrap_or_default();

        Self {
            id: ContainerId::new(summary.id.unwrap_or_default()),
            name,
            image: summary.image.unwrap_or_default(),
            status: summary
                .state
                .as_deref()
                .map_or(ContainerStatus::Unknown, ContainerStatus::from),
            status_text: summary.status.unwrap_or_default(),
            created: summary.created.unwrap_or_default(),
            labels: summary.labels.unwrap_or_default(),
        }
    }
}

/// `80/tcp -> 0.0.0.0:8080` per binding, bare `80/tcp` when unpublished
fn port_lines(ports: Option<PortMap>) -> Vec<String> {
    let mut lines = Vec::new();
    for (port, bindings) in ports.unwrap_or_default() {
        let bindings = bindings.unwrap_or_default();
        if bindings.is_empty() {
            lines.push(port);
            continue;
        }
        for binding in bindings {
            lines.push(format!(
                "{} -> {}:{}",
                port,
                binding.host_ip.unwrap_or_default(),
                binding.host_port.unwrap_or_default()
            ));
        }
    }
    lines.sort();
    lines
}

fn details(requested: &ContainerId, response: ContainerInspectResponse) -> ContainerDetails {
    // bollard's state enum debug-prints as the upper-case API value
    let status = response
        .state
        .and_then(|state| state.status)
        .map_or(ContainerStatus::Unknown, |s| {
            ContainerStatus::from(format!("{:?}", s).as_str())
        });
    let config = response.config.unwrap_or_default();
    let command = config
        .entrypoint
        .unwrap_or_default()
        .into_iter()
        .chain(config.cmd.unwrap_or_default())
        .collect();
    let ports = port_lines(response.network_settings.and_then(|n| n.ports));

    ContainerDetails {
        id: response
            .id
            .map_or_else(|| requested.clone(), ContainerId::new),
        name: response.name.as_deref().map(strip_slash).unwrap_or_default(),
        image: config.image.unwrap_or_default(),
        status,
        created: response.created,
        working_dir: non_empty(config.working_dir),
        user: non_empty(config.user),
        env: config.env.unwrap_or_default(),
        command,
        ports,
        labels: config.labels.unwrap_or_default(),
    }
}

#[async_trait]
impl ContainerProvider for DockerProvider {
    async fn exec(&self, id: &ContainerId, config: &ExecConfig) -> Result<ExecResult> {
        let create = CreateExecOptions {
            cmd: Some(config.cmd.clone()),
            working_dir: config.working_dir.clone(),
            user: config.user.clone(),
            tty: Some(config.tty),
            attach_stdin: Some(false),
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            ..Default::default()
        };
        let created = self
            .client
            .create_exec(&id.0, create)
            .await
            .map_err(|e| ProviderError::ExecError(e.to_string()))?;

        let start = StartExecOptions {
            detach: false,
            tty: config.tty,
            ..Default::default()
        };
        let output = match self
            .client
            .start_exec(&created.id, Some(start))
            .await
            .map_err(|e| ProviderError::ExecError(e.to_string()))?
        {
            StartExecResults::Attached { output, .. } => collect_output(output)
                .await
                .map_err(|e| ProviderError::ExecError(e.to_string()))?,
            StartExecResults::Detached => String::new(),
        };

        // The exit code is only known once the stream has closed
        let exit_code = self
            .client
            .inspect_exec(&created.id)
            .await?
            .exit_code
            .unwrap_or_default();

        tracing::trace!(container = %id.short(), cmd = ?config.cmd, exit_code, "exec done");
        Ok(ExecResult { exit_code, output })
    }

    async fn list(&self, all: bool) -> Result<Vec<ContainerInfo>> {
        let options = ListContainersOptions::<String> {
            all,
            ..Default::default()
        };
        let summaries = self.client.list_containers(Some(options)).await?;
        Ok(summaries.into_iter().map(ContainerInfo::from).collect())
    }

    async fn inspect(&self, id: &ContainerId) -> Result<ContainerDetails> {
        let response = self.client.inspect_container(&id.0, None).await?;
        Ok(details(id, response))
    }

    async fn logs(&self, id: &ContainerId, tail: Option<usize>) -> Result<String> {
        let options = LogsOptions::<String> {
            follow: false,
            stdout: true,
            stderr: true,
            tail: tail.map_or_else(|| "all".to_string(), |n| n.to_string()),
            timestamps: false,
            since: 0,
            until: 0,
        };
        let stream = Box::pin(self.client.logs(&id.0, Some(options)));
        let output = collect_output(stream).await?;
        tracing::trace!(container = %id.short(), bytes = output.len(), "logs fetched");
        Ok(output)
    }

    async fn start(&self, id: &ContainerId) -> Result<()> {
        self.client
            .start_container(&id.0, None::<StartContainerOptions<String>>)
            .await?;
        tracing::info!(container = %id.short(), "started");
        Ok(())
    }

    async fn stop(&self, id: &ContainerId, timeout: Option<u32>) -> Result<()> {
        let options = timeout.map(|secs| StopContainerOptions { t: i64::from(secs) });
        self.client.stop_container(&id.0, options).await?;
        tracing::info!(container = %id.short(), "stopped");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .ping()
            .await
            .map(|_| ())
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))
    }

    fn info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
