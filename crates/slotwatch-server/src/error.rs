//! Server error types.

use std::io;

use slotwatch_providers::ProviderError;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can stop the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Could not bind the listening socket.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The server loop exited with an IO error.
    #[error("server error: {0}")]
    Serve(#[source] io::Error),

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ServerError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type for one resolution pass.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Why a resolution pass could not produce a result.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// An upstream call failed at the transport level or returned non-2xx.
    #[error("upstream fetch failed: {0}")]
    UpstreamFetch(#[source] ProviderError),

    /// An upstream call returned a body of unexpected shape.
    #[error("upstream returned malformed data: {0}")]
    UpstreamFormat(#[source] ProviderError),
}

impl ResolveError {
    /// Short machine-readable kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpstreamFetch(_) => "upstream_fetch",
            Self::UpstreamFormat(_) => "upstream_format",
        }
    }
}

impl From<ProviderError> for ResolveError {
    fn from(err: ProviderError) -> Self {
        if err.is_format_error() {
            Self::UpstreamFormat(err)
        } else {
            Self::UpstreamFetch(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_split_by_kind() {
        let fetch: ResolveError = ProviderError::http_status(502, "bad gateway").into();
        assert_eq!(fetch.kind(), "upstream_fetch");

        let auth: ResolveError = ProviderError::authentication("bad token").into();
        assert!(matches!(auth, ResolveError::UpstreamFetch(_)));

        let format: ResolveError = ProviderError::invalid_response("missing data").into();
        assert_eq!(format.kind(), "upstream_format");
    }

    #[test]
    fn display_includes_cause() {
        let err: ResolveError = ProviderError::network("connection refused")
            .with_provider("tidycal")
            .into();
        assert_eq!(
            err.to_string(),
            "upstream fetch failed: [tidycal] network_error: connection refused"
        );
    }
}
