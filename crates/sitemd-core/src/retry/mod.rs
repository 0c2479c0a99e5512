//! Retry and backoff policy for page fetches.
//!
//! Classifies fetch failures (timeouts, throttling, connection failures,
//! 5xx) and applies exponential backoff so a flaky page does not end up as
//! a failed record on the first hiccup.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
