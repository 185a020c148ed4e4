//! Platform call errors.

use thiserror::Error;

/// Failure of the host call itself. Never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request could not be completed (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Local I/O failed (e.g. writing the target file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors surfaced by a platform fetch.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The host call failed; the underlying error is passed through as is.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The host call succeeded but returned no body.
    #[error("CF API ({path}) returned no output")]
    EmptyResponse { path: String },

    /// The platform answered with an error envelope.
    #[error("CF API ({path}) returned error: [{error_code}] {description}")]
    Platform {
        path: String,
        code: i64,
        error_code: String,
        description: String,
    },

    /// The body did not have the expected resource shape.
    #[error("CF API ({path}) returned an unexpected body: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for platform operations.
pub type ApiResult<T> = Result<T, ApiError>;
