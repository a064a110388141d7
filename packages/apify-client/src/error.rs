//! Error types for the Apify client.

use thiserror::Error;

/// Result type for Apify client operations.
pub type Result<T> = std::result::Result<T, ApifyError>;

/// Apify client errors.
///
/// Every variant here is a submission-side failure from the caller's point
/// of view: the poll loop never returns these (a failed dataset read during
/// polling is treated as "no items yet", see [`crate::poller`]).
#[derive(Debug, Error)]
pub enum ApifyError {
    /// Network failure (connection refused, timeout, bad JSON body).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the Apify API.
    #[error("apify api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The run-creation response had no identifiable run id.
    #[error("run response did not contain a run id")]
    MissingRunId,
}
