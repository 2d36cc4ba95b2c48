//! Watch command: the display poller on a terminal surface.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::warn;

use slotwatch_server::SignalHandler;

use crate::api::AvailabilityClient;
use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};
use crate::poller::Poller;
use crate::render::SpotsWidget;
use crate::surface::TerminalSurface;

/// Timeout for a single availability request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Polls the resolver and redraws the terminal line until interrupted.
pub async fn run(
    config: &AppConfig,
    url: Option<&str>,
    interval: Option<u64>,
    once: bool,
) -> ClientResult<()> {
    let mut settings = config.poller.clone();
    if let Some(url) = url {
        settings.api_url = url.to_string();
    }
    if let Some(secs) = interval {
        settings.interval_secs = secs;
    }
    settings.validate().map_err(ClientError::Config)?;

    let api_url = settings.api_url().map_err(ClientError::Config)?;
    let client = AvailabilityClient::new(api_url, REQUEST_TIMEOUT)?;
    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let surface = TerminalSurface::new(stdout, settings.elements.clone()).with_color(color);
    let mut widget = SpotsWidget::new(client, surface, settings.to_render_config());

    if once {
        widget.update().await;
        widget.surface_mut().finish();
        return Ok(());
    }

    let widget = Arc::new(Mutex::new(widget));
    let poller = Poller::new(settings.to_poller_config());
    let handle = poller.handle();

    let cycle_widget = widget.clone();
    let poller_task = tokio::spawn(async move {
        poller
            .run(move || {
                let widget = cycle_widget.clone();
                async move { widget.lock().await.update().await }
            })
            .await;
    });

    let signal_handler = SignalHandler::new();
    signal_handler.spawn_listener();
    signal_handler.shutdown().wait().await;

    if let Err(e) = handle.stop().await {
        warn!(error = %e, "failed to send stop command to poller");
    }
    let _ = tokio::time::timeout(Duration::from_secs(5), poller_task).await;

    widget.lock().await.surface_mut().finish();
    Ok(())
}
