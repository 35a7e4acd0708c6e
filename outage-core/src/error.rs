//! Core error types for outage reporting.

use thiserror::Error;

/// Core error type for outage operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A timestamp did not parse as ISO-8601 / RFC 3339.
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The offending input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
}
