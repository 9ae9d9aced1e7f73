//! Error types for the diagnostic service client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when requesting a diagnosis.
///
/// A request timeout surfaces through the [`ServiceError::Http`] variant and
/// is treated the same as any other transport failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport failure (unreachable endpoint, timeout, broken connection)
    #[error("diagnostic request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("diagnostic service returned {status}: {detail}")]
    Status {
        status: StatusCode,
        detail: String,
    },

    /// The response body could not be parsed as a diagnosis
    #[error("unparseable diagnosis response: {0}")]
    Parse(#[from] serde_json::Error),
}
