//! Check command: one resolution pass against the live upstream.

use slotwatch_protocol::AvailabilityResponse;
use slotwatch_server::AvailabilityResolver;

use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};

use super::build_provider;

/// Prints the body the server would answer with right now.
///
/// Fails if the resolver had to fall back to the degraded body.
pub async fn run(config: &AppConfig) -> ClientResult<()> {
    let resolver_config = config
        .server
        .to_resolver_config()
        .map_err(ClientError::Config)?;
    let resolver = AvailabilityResolver::new(build_provider(config)?, resolver_config);

    let response = resolver.respond().await;
    let body = serde_json::to_string_pretty(&response)
        .map_err(|e| ClientError::Config(format!("failed to serialize response: {}", e)))?;
    println!("{}", body);

    match response {
        AvailabilityResponse::Degraded(degraded) => {
            Err(ClientError::Degraded(degraded.message))
        }
        _ => Ok(()),
    }
}
