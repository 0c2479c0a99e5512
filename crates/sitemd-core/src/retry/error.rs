//! Page fetch error type for retry classification.

use thiserror::Error;

/// Error returned by a single page fetch. Kept separate from higher-level
/// errors so it can be classified for retries first.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

impl FetchError {
    /// HTTP status, when the server answered at all.
    pub fn status_code(&self) -> Option<u32> {
        match self {
            FetchError::Http(code) => Some(*code),
            FetchError::Curl(_) => None,
        }
    }
}
