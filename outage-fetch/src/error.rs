//! Fetch error types.

use thiserror::Error;

/// Error type for upstream requests.
///
/// Every variant is fatal to a run; the only recovery (retrying HTTP 500)
/// happens inside the executor before one of these is produced.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request method other than GET or POST.
    #[error("Invalid request type '{0}'")]
    InvalidMethod(String),

    /// Base URL or endpoint could not be turned into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-retryable HTTP status.
    #[error("Error ({status}: {reason})")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Standard reason phrase.
        reason: String,
    },

    /// HTTP 500 persisted through every retry.
    #[error("Error ({status}: {reason}) after {retries}/{retries} retries")]
    RetriesExhausted {
        /// Numeric status code of the last attempt.
        status: u16,
        /// Standard reason phrase.
        reason: String,
        /// Number of retries performed.
        retries: u32,
    },

    /// 200 OK on a GET without a usable body.
    #[error("Server returned 200 but no valid data")]
    EmptyPayload,

    /// Payload was JSON but not the expected shape.
    #[error("Unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// API key could not be loaded.
    #[error("Credential error: {0}")]
    Credential(String),
}
