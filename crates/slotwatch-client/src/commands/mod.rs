//! Subcommand implementations.

pub mod check;
pub mod config;
pub mod serve;
pub mod watch;

use std::sync::Arc;

use tracing::info;

use slotwatch_providers::BookingProvider;
use slotwatch_providers::tidycal::TidyCalProvider;

use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};

/// Builds the TidyCal provider from configuration.
pub(crate) fn build_provider(config: &AppConfig) -> ClientResult<Arc<dyn BookingProvider>> {
    let tidycal = config
        .tidycal
        .to_provider_config()
        .map_err(ClientError::Config)?;
    let provider = TidyCalProvider::new(tidycal)?;

    info!(
        page_slug = %provider.config().page_slug,
        booking_type_id = %provider.config().booking_type_id,
        "TidyCal provider initialized"
    );

    Ok(Arc::new(provider))
}
