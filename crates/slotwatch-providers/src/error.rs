//! Error types for booking provider operations.

use std::fmt;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// Connection failed, timed out, or the body could not be read.
    NetworkError,
    /// The upstream answered with a non-2xx status.
    HttpStatus,
    /// The bearer credential was rejected (401).
    AuthenticationFailed,
    /// The body was not JSON or did not have the expected shape.
    InvalidResponse,
    /// Missing or invalid provider configuration.
    ConfigurationError,
}

impl ProviderErrorCode {
    /// Returns `true` for errors caused by the upstream payload rather than
    /// by reaching it.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidResponse)
    }

    /// Returns a machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::HttpStatus => "http_status",
            Self::AuthenticationFailed => "authentication_failed",
            Self::InvalidResponse => "invalid_response",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while talking to a booking provider.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// HTTP status returned by the upstream, if any.
    status: Option<u16>,
    /// Provider that produced the error (e.g. "tidycal").
    provider: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            provider: None,
            source: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates an error for a non-2xx upstream status.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ProviderErrorCode::HttpStatus, message);
        err.status = Some(status);
        err
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        let mut err = Self::new(ProviderErrorCode::AuthenticationFailed, message);
        err.status = Some(401);
        err
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Sets the provider name for this error.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Returns `true` if the upstream payload was malformed.
    pub fn is_format_error(&self) -> bool {
        self.code.is_format_error()
    }

    /// Copies code, message, status and provider. The source is dropped.
    pub fn duplicate(&self) -> Self {
        Self {
            code: self.code,
            message: self.message.clone(),
            status: self.status,
            provider: self.provider.clone(),
            source: None,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref provider) = self.provider {
            write!(f, "[{}] ", provider)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
