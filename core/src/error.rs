//! Error types for the RECAP client.
//!
//! # Design
//! `ApiError` never reaches callers of the `parse_*` methods: the server's
//! contract conflates "not found", "rejected" and "request failed", so every
//! variant collapses to the same empty or `false` result there. The variants
//! exist so that the collapse point can log what actually went wrong.

/// Errors raised while building requests or decoding responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The transport reported failure by delivering no response at all.
    #[error("no response from server")]
    NoResponse,

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Errors raised while reading client configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid server root {0:?}: expected an http:// or https:// URL")]
    InvalidServerRoot(String),
}
