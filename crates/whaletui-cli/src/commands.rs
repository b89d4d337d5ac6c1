//! CLI command implementations

use anyhow::{anyhow, bail, Context, Result};
use std::io::Write;
use std::sync::Arc;
use whaletui_config::GlobalConfig;
use whaletui_core::{Command, InteractiveGuard};
use whaletui_provider::{ContainerInfo, ContainerProvider, ExecConfig};

/// Find a container by exact id, exact name, or unique id/name prefix
pub async fn find_container(
    provider: &dyn ContainerProvider,
    reference: &str,
) -> Result<ContainerInfo> {
    let containers = provider.list(true).await?;

    if let Some(container) = containers
        .iter()
        .find(|c| c.id.0 == reference || c.name == reference)
    {
        return Ok(container.clone());
    }

    let matches: Vec<_> = containers
        .iter()
        .filter(|c| c.id.0.starts_with(reference) || c.name.starts_with(reference))
        .collect();

    match matches.as_slice() {
        [] => Err(anyhow!("Container '{}' not found", reference)),
        [container] => Ok((*container).clone()),
        _ => Err(anyhow!(
            "Ambiguous container reference '{}', matches: {}",
            reference,
            matches
                .iter()
                .map(|c| format!("{} ({})", c.name, c.id.short()))
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}

/// The command line `exec` shows: a single argument is taken as a shell
/// line verbatim, several are re-quoted into one
pub fn command_line(cmd: &[String]) -> String {
    match cmd {
        [line] => line.trim().to_string(),
        _ => shell_words::join(cmd),
    }
}

/// Argv `exec` runs. A single argument goes through the command
/// classifier; several are already split by the caller's shell and pass
/// through untouched.
pub fn command_argv(cmd: &[String]) -> Vec<String> {
    match cmd {
        [line] => Command::parse(line.trim()).into_argv(),
        _ => cmd.to_vec(),
    }
}

/// Run one command in a container and print its combined output
///
/// Returns the command's exit code.
pub async fn exec(
    provider: &dyn ContainerProvider,
    config: &GlobalConfig,
    reference: &str,
    cmd: &[String],
    out: &mut dyn Write,
) -> Result<i64> {
    let line = command_line(cmd);
    if line.is_empty() {
        bail!("No command specified");
    }

    let container = find_container(provider, reference).await?;
    if !container.status.is_running() {
        bail!(
            "Container '{}' is not running (status: {})",
            container.name,
            container.status
        );
    }

    let guard = InteractiveGuard::new(&config.shell.extra_interactive_commands);
    let program = match cmd {
        [_] => line.as_str(),
        _ => cmd[0].as_str(),
    };
    if guard.blocks(program) {
        bail!(
            "'{}' is an interactive command and needs a TTY; use your runtime's `exec -it` instead",
            line
        );
    }

    let argv = command_argv(cmd);
    tracing::debug!(container = %container.id.short(), ?argv, "exec");

    let result = provider
        .exec(&container.id, &ExecConfig::command(argv))
        .await?;

    out.write_all(result.output.as_bytes())?;
    if !result.output.is_empty() && !result.output.ends_with('\n') {
        writeln!(out)?;
    }

    Ok(result.exit_code)
}

/// Print a container's stdout and stderr logs
pub async fn logs(
    provider: &dyn ContainerProvider,
    reference: &str,
    tail: Option<usize>,
    out: &mut dyn Write,
) -> Result<()> {
    let container = find_container(provider, reference).await?;
    let logs = provider.logs(&container.id, tail).await?;
    out.write_all(logs.as_bytes())?;
    Ok(())
}

/// List containers as a table or as JSON
pub async fn list(
    provider: &dyn ContainerProvider,
    all: bool,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let containers = provider.list(all).await?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&containers)?)?;
        return Ok(());
    }

    if containers.is_empty() {
        writeln!(out, "No containers found")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<14}{:<24}{:<28}{:<24}CREATED",
        "CONTAINER ID", "NAME", "IMAGE", "STATUS"
    )?;
    for c in &containers {
        writeln!(
            out,
            "{:<14}{:<24}{:<28}{:<24}{}",
            c.id.short(),
            truncate(&c.name, 23),
            truncate(&c.image, 27),
            truncate(&c.state_label(), 23),
            format_created(c.created)
        )?;
    }

    Ok(())
}

/// Print the configuration as TOML, or only its path
pub fn config(config: &GlobalConfig, path_only: bool, out: &mut dyn Write) -> Result<()> {
    let path = GlobalConfig::config_path()?;

    if path_only {
        writeln!(out, "{}", path.display())?;
        return Ok(());
    }

    writeln!(out, "# {}", path.display())?;
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    write!(out, "{}", content)?;
    Ok(())
}

/// Open the embedded shell for a running container
pub async fn shell(
    provider: Arc<dyn ContainerProvider>,
    config: GlobalConfig,
    reference: &str,
) -> Result<()> {
    let container = find_container(provider.as_ref(), reference).await?;

    // The listing may predate an interactive pick by a while
    let details = provider.inspect(&container.id).await?;
    if !details.status.is_running() {
        bail!(
            "Container '{}' is not running (status: {})",
            container.name,
            details.status
        );
    }

    whaletui_tui::run_shell(provider, config, container).await?;
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}

fn format_created(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
