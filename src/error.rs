//! Error types for the Perpus API client

use thiserror::Error;

/// Main client error type.
///
/// Every failure a domain operation can surface is one of these variants;
/// callers match on the variant, never on message text.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network-level failure: DNS, connection refused, malformed response
    /// body. No usable HTTP response was obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered 401 on an authenticated call. The session has
    /// already been cleared and a `SessionExpired` signal broadcast by the
    /// time this error is returned.
    #[error("Authentication expired. Please login again.")]
    AuthExpired,

    /// Any other non-success HTTP response. `detail` carries the
    /// server-supplied message when the body had one, otherwise a message
    /// built from the status line.
    #[error("{detail}")]
    Api { detail: String },

    /// Login was rejected by the server (bad username/password). Kept
    /// separate from `Api` so callers can distinguish bad credentials from
    /// an unreachable or misbehaving service.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Client-side field validation failed; no request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The durable token store could not be read or written.
    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Validation(errors.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
