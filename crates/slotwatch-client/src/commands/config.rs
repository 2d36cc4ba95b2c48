//! Configuration commands.

use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &AppConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", AppConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
///
/// The API token is resolved, so `pass::` and `env::` references are
/// checked too.
pub fn validate(config: &AppConfig) -> ClientResult<()> {
    config
        .tidycal
        .to_provider_config()
        .map_err(|e| ClientError::Config(format!("[tidycal] {}", e)))?;
    config
        .server
        .to_server_config(None)
        .map_err(|e| ClientError::Config(format!("[server] {}", e)))?;
    config
        .poller
        .validate()
        .map_err(|e| ClientError::Config(format!("[poller] {}", e)))?;

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> ClientResult<()> {
    println!("config: {}", AppConfig::default_path().display());
    Ok(())
}
