//! Client error types.

use slotwatch_core::TracingError;
use slotwatch_protocol::ProtocolError;
use slotwatch_providers::ProviderError;
use slotwatch_server::ServerError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The resolver could not be reached.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The resolver answered with a non-2xx status.
    #[error("resolver returned HTTP {0}")]
    Status(u16),

    /// The resolver body did not decode.
    #[error("invalid resolver response: {0}")]
    Decode(#[from] ProtocolError),

    /// Provider setup failed.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The HTTP server failed.
    #[error(transparent)]
    Server(#[from] ServerError),

    /// The resolver reported an upstream failure.
    #[error("availability check failed: {0}")]
    Degraded(String),

    #[error("failed to initialize logging: {0}")]
    Tracing(#[from] TracingError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
