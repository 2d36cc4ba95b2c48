//! Serve command: runs the HTTP resolver in the foreground.

use tracing::info;

use slotwatch_server::{AvailabilityServer, SignalHandler};

use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};

use super::build_provider;

/// Serves until SIGINT/SIGTERM.
pub async fn run(config: &AppConfig, bind: Option<&str>) -> ClientResult<()> {
    let server_config = config
        .server
        .to_server_config(bind)
        .map_err(ClientError::Config)?;
    let provider = build_provider(config)?;

    let server = AvailabilityServer::new(server_config, provider)?;

    let signal_handler = SignalHandler::new();
    signal_handler.spawn_listener();

    server.serve_until(signal_handler.shutdown().wait()).await?;

    info!("shutdown complete");
    Ok(())
}
