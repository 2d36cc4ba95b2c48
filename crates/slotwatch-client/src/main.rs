//! slotwatch CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use slotwatch_client::cli::{Cli, Command, ConfigAction};
use slotwatch_client::commands;
use slotwatch_client::config::AppConfig;
use slotwatch_client::error::{ClientError, ClientResult};
use slotwatch_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = match cli.command {
        _ if cli.debug => TracingConfig::cli_debug(),
        Command::Serve {
            json_logs: true, ..
        } => TracingConfig::daemon(),
        _ => TracingConfig::default(),
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("error: {}", ClientError::from(e));
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = match cli.config {
        Some(ref path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .map_err(ClientError::Config)?;

    match cli.command {
        Command::Serve { bind, .. } => commands::serve::run(&config, bind.as_deref()).await,
        Command::Check => commands::check::run(&config).await,
        Command::Watch {
            url,
            interval,
            once,
        } => commands::watch::run(&config, url.as_deref(), interval, once).await,
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
