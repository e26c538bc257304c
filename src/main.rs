mod cli;
mod client;
mod deployment;
mod deployment_config;
mod kubernetes;
mod machineset;
mod manifest;
mod patch;
mod types;
mod watch;

use clap::Parser;

use cli::{Cli, Command, WatchCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout is reserved for command output
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = client::load_config(cli.kubeconfig, cli.context).await?;
    if matches!(cli.command, Command::Watch(_)) {
        config = client::without_read_timeout(config);
    }
    let client = client::build_client(config)?;

    match cli.command {
        Command::Deployment(cmd) => deployment::run(client, cmd).await,
        Command::DeploymentConfig(cmd) => deployment_config::run(client, cmd).await,
        Command::MachineSet(cmd) => machineset::run(client, cmd).await,
        Command::Watch(WatchCommand::CrashLoop { namespace }) => {
            watch::watch_crashloops(client, namespace.as_deref()).await
        }
    }
}
