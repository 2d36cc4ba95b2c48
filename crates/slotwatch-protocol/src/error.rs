//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while encoding or decoding bodies.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Failed to serialize a body to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The body was not JSON or lacked the required fields.
    #[error("malformed availability body: {0}")]
    Deserialization(#[source] serde_json::Error),
}
