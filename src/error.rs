//! Error types for Ostinato
//!
//! This module defines all error types used throughout the crate,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Ostinato operations
///
/// This enum encompasses all failure modes of the token lifecycle and
/// the request dispatch layer: credential loading, the interactive
/// authorization hand-off, exchanges against the accounts service, and
/// argument validation in the endpoint methods.
#[derive(Error, Debug)]
pub enum OstinatoError {
    /// Bad or missing credentials file; fatal at construction time
    #[error("Configuration error: {0}")]
    Config(String),

    /// The `state` returned on the authorization redirect did not match
    /// the one generated for the request
    #[error("Security error: {0}")]
    Security(String),

    /// The interactive authorization hand-off could not complete
    /// (deadline expired, listener failure, malformed redirect)
    #[error("Authorization flow error: {0}")]
    AuthFlow(String),

    /// Non-2xx or malformed response from the accounts service
    #[error("Protocol error ({status}): {body}")]
    Protocol {
        /// HTTP status returned by the server
        status: u16,
        /// Response body, kept verbatim for diagnosis
        body: String,
    },

    /// Network-level failure reaching the accounts service or the API
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Caller-supplied parameter outside its valid set; raised before any
    /// network call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OstinatoError {
    /// Builds a [`OstinatoError::Protocol`] from a rejected exchange.
    pub(crate) fn protocol(status: u16, body: impl Into<String>) -> Self {
        OstinatoError::Protocol {
            status,
            body: body.into(),
        }
    }
}

/// Result type alias for Ostinato operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
