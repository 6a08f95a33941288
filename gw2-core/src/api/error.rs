use thiserror::Error;

use super::MAX_IDS_PER_REQUEST;

/// Errors from the game-data API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport or decode failure from the HTTP client
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Server answered with a non-success status
    #[error("server returned {status} for {endpoint}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    /// Caller passed more ids than one request may carry
    #[error("batch of {0} ids exceeds the per-request limit of {MAX_IDS_PER_REQUEST}")]
    BatchTooLarge(usize),
}
