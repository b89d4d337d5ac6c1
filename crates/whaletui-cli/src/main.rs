//! whaletui - container dashboard with an embedded shell

mod selector;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Select};
use selector::select_running_container;
use std::io::IsTerminal;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use whaletui_cli::commands;
use whaletui_config::GlobalConfig;
use whaletui_provider::{
    create_default_provider, create_provider, detect_available_providers, ContainerProvider,
    ProviderType,
};

#[derive(Parser)]
#[command(name = "whaletui")]
#[command(author, version, about = "Container dashboard with an embedded shell", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override default provider (docker or podman)
    #[arg(long, global = true, value_parser = ["docker", "podman"])]
    provider: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the embedded shell in a container
    Shell {
        /// Container name or ID (interactive selection if not specified)
        container: Option<String>,
    },

    /// Run one command in a container and print its output
    Exec {
        /// Container name or ID
        container: String,
        /// Command to run; a single argument is treated as a shell line
        #[arg(trailing_var_arg = true, required = true)]
        cmd: Vec<String>,
    },

    /// Print a container's logs
    Logs {
        /// Container name or ID
        container: String,
        /// Only the last N lines
        #[arg(short = 'n', long)]
        tail: Option<usize>,
    },

    /// List containers
    List {
        /// Include stopped containers
        #[arg(short, long)]
        all: bool,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the global configuration
    Config {
        /// Only print the config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = GlobalConfig::load()?;

    let dashboard = matches!(cli.command, None | Some(Commands::Shell { .. }));
    init_logging(&cli, &config, dashboard)?;

    // Config doesn't need a provider
    if let Some(Commands::Config { path }) = &cli.command {
        commands::config(&config, *path, &mut std::io::stdout())?;
        return Ok(());
    }

    if config.is_first_run() && cli.provider.is_none() {
        if let Some(selected) = detect_and_select_provider(&config).await? {
            config.defaults.provider = selected.to_string();
            if let Err(e) = config.save() {
                eprintln!("Warning: Could not save provider selection: {}", e);
            } else {
                eprintln!("Provider '{}' saved to config", config.defaults.provider);
            }
        }
    }

    let provider: Arc<dyn ContainerProvider> = match cli.provider.as_deref() {
        Some(name) => {
            let provider_type: ProviderType = name.parse().map_err(anyhow::Error::msg)?;
            create_provider(provider_type, &config).await?
        }
        None => create_default_provider(&config).await?,
    }
    .into();

    match cli.command {
        None => whaletui_tui::run(provider, config).await?,
        Some(Commands::Shell { container }) => {
            let reference = match container {
                Some(reference) => reference,
                None => {
                    let containers = provider.list(false).await?;
                    select_running_container(&containers, "Select container to open a shell in:")?
                }
            };
            commands::shell(provider, config, &reference).await?;
        }
        Some(Commands::Exec { container, cmd }) => {
            let mut stdout = std::io::stdout();
            let code = commands::exec(provider.as_ref(), &config, &container, &cmd, &mut stdout)
                .await?;
            if code != 0 {
                std::process::exit(i32::try_from(code).unwrap_or(1));
            }
        }
        Some(Commands::Logs { container, tail }) => {
            commands::logs(provider.as_ref(), &container, tail, &mut std::io::stdout()).await?;
        }
        Some(Commands::List { all, json }) => {
            commands::list(provider.as_ref(), all, json, &mut std::io::stdout()).await?;
        }
        Some(Commands::Config { .. }) => unreachable!(), // Handled above
    }

    Ok(())
}

/// CLI commands log to stderr; the dashboard logs only to the configured
/// file, since stderr would corrupt the screen
fn init_logging(cli: &Cli, config: &GlobalConfig, dashboard: bool) -> anyhow::Result<()> {
    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    if !dashboard {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
        return Ok(());
    }

    if let Some(path) = &config.logging.file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    }

    Ok(())
}

/// Detect available providers and prompt user to select one if both are available
async fn detect_and_select_provider(
    config: &GlobalConfig,
) -> anyhow::Result<Option<ProviderType>> {
    eprintln!("First run detected - checking for container providers...");

    let available = detect_available_providers(config).await;
    let is_available = |wanted: ProviderType| {
        available
            .iter()
            .any(|(t, ok)| *t == wanted && *ok)
    };

    match (is_available(ProviderType::Docker), is_available(ProviderType::Podman)) {
        (false, false) => {
            eprintln!("No container providers detected.");
            eprintln!("Please install Docker or Podman and try again.");
            Ok(None)
        }
        (true, false) => {
            eprintln!("Auto-selected Docker (only available provider)");
            Ok(Some(ProviderType::Docker))
        }
        (false, true) => {
            eprintln!("Auto-selected Podman (only available provider)");
            Ok(Some(ProviderType::Podman))
        }
        (true, true) => {
            eprintln!("Both Docker and Podman are available.");

            if !std::io::stdin().is_terminal() {
                eprintln!("Non-interactive mode - defaulting to Docker");
                return Ok(Some(ProviderType::Docker));
            }

            let items = ["Docker (recommended)", "Podman"];
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Select your preferred container provider")
                .items(&items)
                .default(0)
                .interact()?;

            Ok(Some(if selection == 0 {
                ProviderType::Docker
            } else {
                ProviderType::Podman
            }))
        }
    }
}
